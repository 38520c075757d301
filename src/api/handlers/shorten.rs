//! Handler for the shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::{AppError, ShortenError};
use crate::state::AppState;

/// Returns the short code for a long URL, creating one on first use.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/a/b" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "Xb3k9_Qa1-Zt" }
/// ```
///
/// Repeated requests for the same URL return the same code.
///
/// # Errors
///
/// - 400 Bad Request if the body is not valid JSON or `url` is empty/oversized
/// - 406 Not Acceptable (empty body) if the URL points at the service's own domain
/// - 503 Service Unavailable if link storage fails
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    match state.shortener.shorten(&payload.url).await {
        Ok(code) => Ok(Json(ShortenResponse { short_url: code })),
        Err(ShortenError::SelfReferential) => {
            tracing::info!(url = %payload.url, "Rejected self-referential URL");
            Err(ShortenError::SelfReferential.into())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to shorten URL");
            Err(e.into())
        }
    }
}
