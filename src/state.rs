//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, QrService};

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub qr_service: Arc<QrService>,
    /// Prefix for URLs in responses. When `None`, `http://{Host}` is used.
    pub base_url: Option<String>,
}
