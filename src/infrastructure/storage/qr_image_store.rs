//! QR image encoding and PNG file storage.

use image::{GrayImage, ImageFormat, Luma, imageops};
use qrcode::{EcLevel, QrCode};
use serde_json::json;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::entities::qr_code::image_file_name;
use crate::error::AppError;

/// Width and height of every stored image, in pixels.
pub const IMAGE_SIZE: u32 = 256;

/// Stores QR images as `{qr_id}.png` in a content directory.
///
/// Paths are derived from [`Uuid`]s only, so they cannot escape the directory.
#[derive(Debug, Clone)]
pub struct QrImageStore {
    content_dir: PathBuf,
}

impl QrImageStore {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn image_path(&self, qr_id: Uuid) -> PathBuf {
        self.content_dir.join(image_file_name(qr_id))
    }

    /// Creates the content directory if it does not exist.
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.content_dir).await?;
        Ok(())
    }

    /// Returns true if the content directory exists and is a directory.
    pub async fn is_available(&self) -> bool {
        tokio::fs::metadata(&self.content_dir)
            .await
            .is_ok_and(|m| m.is_dir())
    }

    /// Encodes `long_url` as a QR image and writes it to `{qr_id}.png`.
    ///
    /// Encoding runs on the blocking pool.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Encode`] if the data does not fit in a QR symbol or
    /// PNG encoding fails, and [`AppError::Io`] if the file cannot be written.
    pub async fn encode_and_store(&self, long_url: &str, qr_id: Uuid) -> Result<PathBuf, AppError> {
        let data = long_url.to_owned();
        let png = tokio::task::spawn_blocking(move || encode_png(&data))
            .await
            .map_err(|e| {
                AppError::internal("QR encoding task failed", json!({ "reason": e.to_string() }))
            })??;

        let path = self.image_path(qr_id);
        tokio::fs::write(&path, png).await?;

        tracing::debug!(qr_id = %qr_id, path = %path.display(), "QR image stored");
        Ok(path)
    }

    /// Reads the stored image for `qr_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the file does not exist.
    pub async fn read_image(&self, qr_id: Uuid) -> Result<Vec<u8>, AppError> {
        match tokio::fs::read(self.image_path(qr_id)).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AppError::not_found(
                "QR image not found",
                json!({ "qr_id": qr_id }),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the stored image for `qr_id`. A missing file is not an error.
    pub async fn remove_image(&self, qr_id: Uuid) -> Result<(), AppError> {
        match tokio::fs::remove_file(self.image_path(qr_id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists the ids of all `*.png` files whose stem is a UUID.
    pub async fn list_image_ids(&self) -> Result<Vec<Uuid>, AppError> {
        let mut entries = tokio::fs::read_dir(&self.content_dir).await?;
        let mut ids = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Uuid::parse_str(s).ok())
            {
                ids.push(id);
            }
        }

        ids.sort();
        Ok(ids)
    }
}

/// Encodes `data` as a QR symbol at error-correction level M and renders it,
/// centred with its quiet zone, on a white `IMAGE_SIZE` x `IMAGE_SIZE` PNG.
pub fn encode_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M).map_err(|e| {
        AppError::encode(
            "Failed to encode QR code",
            json!({ "reason": e.to_string(), "length": data.len() }),
        )
    })?;

    let symbol = code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .max_dimensions(IMAGE_SIZE, IMAGE_SIZE)
        .build();

    let mut canvas = GrayImage::from_pixel(IMAGE_SIZE, IMAGE_SIZE, Luma([255u8]));
    let x = IMAGE_SIZE.saturating_sub(symbol.width()) / 2;
    let y = IMAGE_SIZE.saturating_sub(symbol.height()) / 2;
    imageops::overlay(&mut canvas, &symbol, i64::from(x), i64::from(y));

    let mut png = Cursor::new(Vec::new());
    canvas.write_to(&mut png, ImageFormat::Png).map_err(|e| {
        AppError::encode("Failed to encode PNG", json!({ "reason": e.to_string() }))
    })?;

    Ok(png.into_inner())
}
