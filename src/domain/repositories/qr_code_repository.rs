//! Repository trait for QR code records.

use crate::domain::entities::{NewQrCode, QrCode};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for QR code records.
///
/// Only the record lives here; the image itself is handled by
/// [`crate::infrastructure::storage::QrImageStore`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QrCodeRepository: Send + Sync {
    /// Inserts a new QR code record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id already exists.
    /// Returns [`AppError::Storage`] on any other database error.
    async fn create(&self, new_qr: NewQrCode) -> Result<QrCode, AppError>;

    /// Finds a QR code record by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_id(&self, qr_id: Uuid) -> Result<Option<QrCode>, AppError>;

    /// Counts stored QR code records.
    async fn count(&self) -> Result<i64, AppError>;
}
