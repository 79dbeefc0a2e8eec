//! Index page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the index page.
///
/// Renders `templates/index.html`: a form posting `long_url` and `source`
/// to `/create`.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

/// Renders the index page.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler() -> impl IntoResponse {
    IndexTemplate {}
}
