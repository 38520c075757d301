//! Exclusion rule for URLs that point back at the service itself.

use regex::Regex;

/// Rejects long URLs whose host is the service's own domain or one of its
/// subdomains, so that short links can never point at other short links.
///
/// Matching is case-insensitive: the candidate is lowercased before the
/// pattern is applied.
#[derive(Debug, Clone)]
pub struct SelfReferencePolicy {
    domain: String,
    pattern: Regex,
}

impl SelfReferencePolicy {
    /// Builds the policy for `domain` (e.g. `shitp.st`).
    ///
    /// # Errors
    ///
    /// Returns [`regex::Error`] if the resulting pattern cannot be compiled.
    pub fn new(domain: &str) -> Result<Self, regex::Error> {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        let pattern = Regex::new(&format!(
            r"(?s)^https?://([^/?#@]*@)?([a-z0-9-]+\.)*{}\.?(:[0-9]+)?([/?#].*)?$",
            regex::escape(&domain)
        ))?;

        Ok(Self { domain, pattern })
    }

    /// The domain this policy protects, lowercased.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true if `long_url` targets the protected domain.
    pub fn is_self_referential(&self, long_url: &str) -> bool {
        self.pattern.is_match(&long_url.trim().to_lowercase())
    }
}
