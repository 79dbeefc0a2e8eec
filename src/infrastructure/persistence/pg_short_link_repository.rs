//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;

/// Primary key constraint PostgreSQL creates for `short_links`.
const SHORT_LINK_PKEY: &str = "short_links_pkey";

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    short_link: String,
    long_url: String,
    create_time: DateTime<Utc>,
    ip: String,
    user_agent: Option<String>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink::new(
            row.short_link,
            row.long_url,
            row.create_time,
            row.ip,
            row.user_agent,
        )
    }
}

/// PostgreSQL repository for short links.
///
/// Uses bound parameters throughout; uniqueness is enforced by the primary key.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (short_link, long_url, ip, user_agent)
            VALUES ($1, $2, $3, $4)
            RETURNING short_link, long_url, create_time, ip, user_agent
            "#,
        )
        .bind(&new_link.short_link)
        .bind(&new_link.long_url)
        .bind(&new_link.ip)
        .bind(&new_link.user_agent)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on(&e, SHORT_LINK_PKEY) {
                AppError::conflict(
                    "Short link already exists",
                    json!({ "short_link": new_link.short_link }),
                )
            } else {
                e.into()
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            SELECT short_link, long_url, create_time, ip, user_agent
            FROM short_links
            WHERE short_link = $1
            "#,
        )
        .bind(short_link)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
