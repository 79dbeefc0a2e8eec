//! HTTP request handlers for non-HTML endpoints.

pub mod health;
pub mod qr_image;
pub mod redirect;

pub use health::health_handler;
pub use qr_image::qr_image_handler;
pub use redirect::redirect_handler;
