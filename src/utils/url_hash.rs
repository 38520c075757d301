use sha2::{Digest, Sha256};

/// Hashes a long URL into the key used by the unique index on `links`.
///
/// Returns the lowercase hex SHA-256 of the exact input bytes; no
/// normalization is applied, so URLs that differ in any byte get distinct keys.
pub fn long_url_hash(long_url: &str) -> String {
    hex::encode(Sha256::digest(long_url.as_bytes()))
}
