//! Domain layer: entities and repository interfaces.
//!
//! - [`entities`] - Short link and QR code records
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod repositories;
