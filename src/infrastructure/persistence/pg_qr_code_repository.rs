//! PostgreSQL implementation of the QR code repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewQrCode, QrCode};
use crate::domain::repositories::QrCodeRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct QrCodeRow {
    qr_id: Uuid,
    long_url: String,
    create_time: DateTime<Utc>,
    ip: String,
    user_agent: Option<String>,
}

impl From<QrCodeRow> for QrCode {
    fn from(row: QrCodeRow) -> Self {
        QrCode::new(
            row.qr_id,
            row.long_url,
            row.create_time,
            row.ip,
            row.user_agent,
        )
    }
}

/// PostgreSQL repository for QR code records.
pub struct PgQrCodeRepository {
    pool: Arc<PgPool>,
}

impl PgQrCodeRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QrCodeRepository for PgQrCodeRepository {
    async fn create(&self, new_qr: NewQrCode) -> Result<QrCode, AppError> {
        let row = sqlx::query_as::<_, QrCodeRow>(
            r#"
            INSERT INTO qr_codes (qr_id, long_url, ip, user_agent)
            VALUES ($1, $2, $3, $4)
            RETURNING qr_id, long_url, create_time, ip, user_agent
            "#,
        )
        .bind(new_qr.qr_id)
        .bind(&new_qr.long_url)
        .bind(&new_qr.ip)
        .bind(&new_qr.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, qr_id: Uuid) -> Result<Option<QrCode>, AppError> {
        let row = sqlx::query_as::<_, QrCodeRow>(
            r#"
            SELECT qr_id, long_url, create_time, ip, user_agent
            FROM qr_codes
            WHERE qr_id = $1
            "#,
        )
        .bind(qr_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(QrCode::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM qr_codes")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
