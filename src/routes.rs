//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                     - Index page with the create form
//! - `POST /create`               - Create a short link or QR code
//! - `GET  /health`               - Health check: DB, content directory
//! - `GET  /qrcodes/{qr_id}.png`  - Stored QR image
//! - `GET  /{short_link}`         - Short link redirect
//!
//! # Middleware
//!
//! - **Panic boundary** - Any handler panic becomes a fixed 500 response
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{health_handler, qr_image_handler, redirect_handler};
use crate::api::middleware::{panic, tracing};
use crate::state::AppState;
use crate::web::handlers::{create_handler, index_handler};
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path
/// normalization.
///
/// Static routes take precedence over `/{short_link}`; generated short links
/// never collide with them.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/create", post(create_handler))
        .route("/health", get(health_handler))
        .route("/qrcodes/{file}", get(qr_image_handler))
        .route("/{short_link}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
        .layer(panic::layer())
}

/// Constructs the application service served by [`crate::server::run`].
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
