//! Application layer services implementing business logic.
//!
//! Services coordinate the identifier generator, repositories and the image
//! store, and give HTTP handlers a small API to call.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution
//! - [`services::qr_service::QrService`] - QR image generation and retrieval

pub mod services;
