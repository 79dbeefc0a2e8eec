//! QR code creation and retrieval service.

use std::sync::Arc;

use crate::application::services::link_service::require_long_url;
use crate::domain::entities::{NewQrCode, QrCode};
use crate::domain::repositories::QrCodeRepository;
use crate::error::AppError;
use crate::infrastructure::storage::QrImageStore;
use crate::utils::code_generator::generate_qr_id;
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

/// Service for generating QR images and resolving them by id.
///
/// Each QR code is a record in the repository plus a PNG file in the
/// [`QrImageStore`]. The file is written first; if the record cannot be
/// inserted the file is removed again, so no image is left without a record.
pub struct QrService {
    repository: Arc<dyn QrCodeRepository>,
    images: Arc<QrImageStore>,
}

impl QrService {
    /// Creates a new QR service.
    pub fn new(repository: Arc<dyn QrCodeRepository>, images: Arc<QrImageStore>) -> Self {
        Self { repository, images }
    }

    pub fn images(&self) -> &QrImageStore {
        &self.images
    }

    /// Generates a QR image for `long_url` and records it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is blank,
    /// [`AppError::Encode`] / [`AppError::Io`] if the image cannot be produced,
    /// and [`AppError::Storage`] if the record cannot be inserted.
    pub async fn create_qr_code(
        &self,
        long_url: &str,
        ip: String,
        user_agent: Option<String>,
    ) -> Result<QrCode, AppError> {
        let long_url = require_long_url(long_url)?;
        let qr_id = generate_qr_id();

        self.images.encode_and_store(long_url, qr_id).await?;

        match self
            .create_qr_record(qr_id, long_url, ip, user_agent)
            .await
        {
            Ok(qr) => {
                info!(qr_id = %qr.qr_id, "QR code created");
                Ok(qr)
            }
            Err(e) => {
                if let Err(cleanup) = self.images.remove_image(qr_id).await {
                    error!(qr_id = %qr_id, error = %cleanup, "Failed to remove orphaned QR image");
                }
                Err(e)
            }
        }
    }

    /// Inserts the record for an already generated image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on any insert failure, including an id
    /// collision.
    pub async fn create_qr_record(
        &self,
        qr_id: Uuid,
        long_url: &str,
        ip: String,
        user_agent: Option<String>,
    ) -> Result<QrCode, AppError> {
        let new_qr = NewQrCode {
            qr_id,
            long_url: long_url.to_string(),
            ip,
            user_agent,
        };

        self.repository.create(new_qr).await.map_err(|e| match e {
            AppError::Conflict { message, details } => AppError::storage(message, details),
            other => other,
        })
    }

    /// Retrieves the record for `qr_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    pub async fn qr_record_for(&self, qr_id: Uuid) -> Result<QrCode, AppError> {
        self.repository
            .find_by_id(qr_id)
            .await?
            .ok_or_else(|| AppError::not_found("QR code not found", json!({ "qr_id": qr_id })))
    }

    /// Resolves a raw id from a request path to its record and PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is not a UUID, has no record,
    /// or its image file is missing.
    pub async fn get_qr_code(&self, raw_id: &str) -> Result<(QrCode, Vec<u8>), AppError> {
        let qr_id = Uuid::parse_str(raw_id)
            .map_err(|_| AppError::not_found("QR code not found", json!({ "qr_id": raw_id })))?;

        let record = self.qr_record_for(qr_id).await?;
        let content = self.images.read_image(qr_id).await?;

        Ok((record, content))
    }

    /// Builds the public URL of the image for `qr_id`.
    pub fn image_url(&self, base_url: &str, qr_id: Uuid) -> String {
        format!("{}/qrcodes/{}.png", base_url.trim_end_matches('/'), qr_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockQrCodeRepository;
    use chrono::Utc;
    use tempfile::TempDir;

    fn service(repo: MockQrCodeRepository) -> (QrService, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let images = Arc::new(QrImageStore::new(dir.path()));
        (QrService::new(Arc::new(repo), images), dir)
    }

    fn stored_files(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn test_create_qr_code_writes_image_and_record() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create()
            .withf(|new_qr| new_qr.long_url == "https://example.com" && new_qr.ip == "10.1.1.1")
            .times(1)
            .returning(|new_qr| Ok(new_qr.into_qr_code(Utc::now())));

        let (service, dir) = service(repo);
        let qr = service
            .create_qr_code("https://example.com", "10.1.1.1".into(), None)
            .await
            .unwrap();

        assert_eq!(qr.qr_id.get_version_num(), 4);
        assert!(dir.path().join(qr.image_file_name()).exists());
    }

    #[tokio::test]
    async fn test_create_qr_code_removes_image_when_insert_fails() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::storage("Database error", json!({}))));

        let (service, dir) = service(repo);
        let result = service
            .create_qr_code("https://example.com", "10.1.1.1".into(), None)
            .await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
        assert_eq!(stored_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_create_qr_code_blank_url() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create().times(0);

        let (service, dir) = service(repo);
        let result = service.create_qr_code("", "10.1.1.1".into(), None).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
        assert_eq!(stored_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_create_qr_code_encode_failure_skips_insert() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create().times(0);

        let (service, dir) = service(repo);
        let result = service
            .create_qr_code(&"y".repeat(5_000), "10.1.1.1".into(), None)
            .await;

        assert!(matches!(result, Err(AppError::Encode { .. })));
        assert_eq!(stored_files(&dir), 0);
    }

    #[tokio::test]
    async fn test_create_qr_record_conflict_is_storage_error() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));

        let (service, _dir) = service(repo);
        let result = service
            .create_qr_record(Uuid::new_v4(), "https://example.com", "10.1.1.1".into(), None)
            .await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_get_qr_code_round_trip() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|new_qr| Ok(new_qr.into_qr_code(Utc::now())));
        repo.expect_find_by_id().times(1).returning(|id| {
            Ok(Some(QrCode::new(
                id,
                "https://example.com/qr".to_string(),
                Utc::now(),
                "10.1.1.1".to_string(),
                None,
            )))
        });

        let (service, _dir) = service(repo);
        let created = service
            .create_qr_code("https://example.com/qr", "10.1.1.1".into(), None)
            .await
            .unwrap();

        let (record, content) = service
            .get_qr_code(&created.qr_id.to_string())
            .await
            .unwrap();

        assert_eq!(record.long_url, "https://example.com/qr");
        assert!(!content.is_empty());
    }

    #[tokio::test]
    async fn test_get_qr_code_invalid_id() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_find_by_id().times(0);

        let (service, _dir) = service(repo);
        let result = service.get_qr_code("../../etc/passwd").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_qr_code_unknown_id() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let (service, _dir) = service(repo);
        let result = service.get_qr_code(&Uuid::new_v4().to_string()).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_qr_code_missing_file() {
        let mut repo = MockQrCodeRepository::new();
        repo.expect_find_by_id().times(1).returning(|id| {
            Ok(Some(QrCode::new(
                id,
                "https://example.com".to_string(),
                Utc::now(),
                "10.1.1.1".to_string(),
                None,
            )))
        });

        let (service, _dir) = service(repo);
        let result = service.get_qr_code(&Uuid::new_v4().to_string()).await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_image_url() {
        let (service, _dir) = service(MockQrCodeRepository::new());
        let id = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap();

        assert_eq!(
            service.image_url("http://sho.rt/", id),
            "http://sho.rt/qrcodes/67e55044-10b1-426f-9247-bb680e5fe0c8.png"
        );
    }
}
