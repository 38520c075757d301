//! Link entity representing a shortened URL mapping.

use serde::{Deserialize, Serialize};

/// A mapping between a short code and the long URL it stands for.
///
/// Links are created once and never mutated. The serialized field names
/// follow the persisted record shape (`short_url`, `long_url`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "short_url")]
    pub code: String,
    pub long_url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(code: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            long_url: long_url.into(),
        }
    }
}
