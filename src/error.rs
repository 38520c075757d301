//! Error types for the storage boundary, the shortening core and the HTTP layer.
//!
//! - [`StoreError`] - failures reported by a [`crate::domain::repositories::LinkStore`]
//! - [`ShortenError`] - outcomes of [`crate::application::services::Shortener::shorten`]
//!   other than success
//! - [`AppError`] - HTTP-facing errors rendered as a JSON envelope

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Errors raised by link storage backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The short code is already assigned to a different long URL.
    #[error("short code '{0}' is already taken")]
    CodeTaken(String),

    /// The backend could not be reached or rejected the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Backend(e.to_string())
    }
}

/// Non-success outcomes of a shorten request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShortenError {
    /// The URL points at the service's own domain.
    #[error("URL points at the shortener itself")]
    SelfReferential,

    /// No usable short code was produced within the attempt budget.
    #[error("failed to generate a usable short code after {attempts} attempts")]
    GenerationExhausted { attempts: usize },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Payload carried under `error` in the JSON envelope.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// HTTP-facing application error.
///
/// Every variant except [`AppError::NotAcceptable`] renders as
/// `{"error": {"code", "message", "details"}}`; a not-acceptable outcome is
/// returned with an empty body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotAcceptable { message: String },
    #[error("{message}")]
    Unavailable { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_acceptable(message: impl Into<String>) -> Self {
        Self::NotAcceptable {
            message: message.into(),
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => {
                ("validation_error", message.clone(), details.clone())
            }
            Self::NotAcceptable { message } => ("not_acceptable", message.clone(), json!({})),
            Self::Unavailable { message, details } => {
                ("service_unavailable", message.clone(), details.clone())
            }
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::NotAcceptable { .. } = self {
            return status.into_response();
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            ShortenError::SelfReferential => {
                Self::not_acceptable("URL points at the shortener itself")
            }
            ShortenError::GenerationExhausted { attempts } => Self::unavailable(
                "Failed to generate a short code",
                json!({ "attempts": attempts }),
            ),
            ShortenError::Store(store) => {
                Self::unavailable("Link storage unavailable", json!({ "reason": store.to_string() }))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        Self::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("bad", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_acceptable("nope").status(),
            StatusCode::NOT_ACCEPTABLE
        );
        assert_eq!(
            AppError::unavailable("down", json!({})).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_self_referential_maps_to_not_acceptable() {
        let err = AppError::from(ShortenError::SelfReferential);
        assert!(matches!(err, AppError::NotAcceptable { .. }));
    }

    #[test]
    fn test_store_failure_maps_to_unavailable() {
        let err = AppError::from(ShortenError::Store(StoreError::Backend(
            "connection refused".to_string(),
        )));

        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        let info = err.to_error_info();
        assert_eq!(info.code, "service_unavailable");
        assert!(info.details["reason"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
    }

    #[test]
    fn test_exhaustion_maps_to_unavailable() {
        let err = AppError::from(ShortenError::GenerationExhausted { attempts: 10 });

        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_error_info().details["attempts"], 10);
    }

    #[test]
    fn test_not_acceptable_has_empty_body() {
        let response = AppError::not_acceptable("nope").into_response();

        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
        assert!(response.headers().get("content-type").is_none());
    }

    #[test]
    fn test_store_error_converts_into_shorten_error() {
        let err: ShortenError = StoreError::CodeTaken("abc".to_string()).into();
        assert_eq!(err, ShortenError::Store(StoreError::CodeTaken("abc".to_string())));
    }
}
