//! Handler serving stored QR images.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// QR images never change once written.
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Returns the PNG image for a QR code.
///
/// # Endpoint
///
/// `GET /qrcodes/{qr_id}.png`
///
/// # Errors
///
/// Returns 404 Not Found if the file name is not `{uuid}.png`, the QR code
/// has no record, or its image is missing.
pub async fn qr_image_handler(
    Path(file_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let raw_id = file_name
        .strip_suffix(".png")
        .ok_or_else(|| AppError::not_found("QR image not found", json!({ "file": file_name })))?;

    let (_, content) = state.qr_service.get_qr_code(raw_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        content,
    )
        .into_response())
}
