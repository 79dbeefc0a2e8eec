//! Form submitted to `POST /create`.

use serde::Deserialize;
use validator::Validate;

/// Value of `source` that selects QR code generation.
pub const SOURCE_QR: &str = "qr";

/// Create request posted by the index page form.
///
/// Both fields default to empty so a missing `long_url` is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Missing long URL"))]
    pub long_url: String,

    /// `qr` for a QR code; anything else creates a short link.
    #[serde(default)]
    pub source: Option<String>,
}

impl CreateForm {
    pub fn wants_qr_code(&self) -> bool {
        self.source
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(SOURCE_QR))
    }
}
