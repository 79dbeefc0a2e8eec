//! File storage for generated QR images.
//!
//! - [`QrImageStore`] - Encodes QR images and persists them as PNG files

pub mod qr_image_store;

pub use qr_image_store::QrImageStore;
