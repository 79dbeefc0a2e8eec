//! Handler for short link redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short link to its long URL.
///
/// # Endpoint
///
/// `GET /{short_link}`
///
/// # Errors
///
/// Returns 404 Not Found if the short link doesn't exist.
pub async fn redirect_handler(
    Path(short_link): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let long_url = state.link_service.long_url_for(&short_link).await?;

    let location = HeaderValue::try_from(long_url.as_str()).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "short_link": short_link, "reason": e.to_string() }),
        )
    })?;

    debug!(short_link = %short_link, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
