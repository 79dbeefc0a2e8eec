//! Core domain entities.
//!
//! Entities are plain data. Each has a `New*` counterpart describing an insert,
//! since `create_time` is assigned by the store.
//!
//! - [`ShortLink`] - A short code mapped to a long URL
//! - [`QrCode`] - A generated QR image mapped to a long URL

pub mod qr_code;
pub mod short_link;

pub use qr_code::{NewQrCode, QrCode};
pub use short_link::{NewShortLink, ShortLink};
