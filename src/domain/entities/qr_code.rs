//! QR code entity: a generated image and the long URL it encodes.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored QR code record.
///
/// The image lives in the content directory as [`QrCode::image_file_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    pub qr_id: Uuid,
    pub long_url: String,
    pub create_time: DateTime<Utc>,
    pub ip: String,
    pub user_agent: Option<String>,
}

impl QrCode {
    /// Creates a new QrCode instance.
    pub fn new(
        qr_id: Uuid,
        long_url: String,
        create_time: DateTime<Utc>,
        ip: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            qr_id,
            long_url,
            create_time,
            ip,
            user_agent,
        }
    }

    /// File name of the image, `{qr_id}.png`.
    pub fn image_file_name(&self) -> String {
        image_file_name(self.qr_id)
    }
}

/// File name of the image for `qr_id`.
pub fn image_file_name(qr_id: Uuid) -> String {
    format!("{qr_id}.png")
}

/// Input data for inserting a QR code record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQrCode {
    pub qr_id: Uuid,
    pub long_url: String,
    pub ip: String,
    pub user_agent: Option<String>,
}

impl NewQrCode {
    /// Turns the insert request into a stored record.
    pub fn into_qr_code(self, create_time: DateTime<Utc>) -> QrCode {
        QrCode::new(
            self.qr_id,
            self.long_url,
            create_time,
            self.ip,
            self.user_agent,
        )
    }
}
