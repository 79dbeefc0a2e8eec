//! Handler for the create form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::create::CreateForm;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::ClientInfo;

/// Snippet shown after a short link is created.
#[derive(Template, WebTemplate)]
#[template(path = "short_link_created.html")]
pub struct ShortLinkCreatedTemplate {
    pub short_url: String,
    pub long_url: String,
}

/// Snippet shown after a QR code is created.
#[derive(Template, WebTemplate)]
#[template(path = "qr_code_created.html")]
pub struct QrCodeCreatedTemplate {
    pub image_url: String,
    pub long_url: String,
}

/// Creates a short link, or a QR code when `source=qr`.
///
/// # Endpoint
///
/// `POST /create` (`application/x-www-form-urlencoded`)
///
/// # Form Fields
///
/// - `long_url` (required) - URL to shorten or encode
/// - `source` (optional) - `qr` to generate a QR code instead of a short link
///
/// # Response
///
/// An HTML snippet containing the resulting URL.
///
/// # Errors
///
/// Returns 400 Bad Request if `long_url` is missing or blank, or the body is
/// not a form. Returns 500 if storage or image generation fails.
pub async fn create_handler(
    State(state): State<AppState>,
    client: ClientInfo,
    form: Result<Form<CreateForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = form.map_err(|rejection| {
        AppError::bad_request(
            "Invalid form submission",
            json!({ "reason": rejection.body_text() }),
        )
    })?;
    form.validate()?;

    let base_url = client.base_url(state.base_url.as_deref())?;

    if form.wants_qr_code() {
        let qr = state
            .qr_service
            .create_qr_code(&form.long_url, client.ip, client.user_agent)
            .await?;

        Ok(QrCodeCreatedTemplate {
            image_url: state.qr_service.image_url(&base_url, qr.qr_id),
            long_url: qr.long_url,
        }
        .into_response())
    } else {
        let link = state
            .link_service
            .create_short_link(&form.long_url, client.ip, client.user_agent)
            .await?;

        Ok(ShortLinkCreatedTemplate {
            short_url: state.link_service.short_url(&base_url, &link.short_link),
            long_url: link.long_url,
        }
        .into_response())
    }
}
