//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// The URL is taken as-is; it is not required to be well-formed.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 8192, message = "URL must be 1-8192 characters"))]
    pub url: String,
}

/// Successful shortening result.
///
/// `short_url` carries the short code, matching the persisted record field.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShortenResponse {
    pub short_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_deserializes() {
        let request: ShortenRequest =
            serde_json::from_value(json!({ "url": "https://example.com" })).unwrap();

        assert_eq!(request.url, "https://example.com");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let request = ShortenRequest { url: String::new() };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_oversized_url_fails_validation() {
        let request = ShortenRequest {
            url: format!("https://example.com/{}", "a".repeat(8192)),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_shape() {
        let response = ShortenResponse {
            short_url: "abc123".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "short_url": "abc123" })
        );
    }
}
