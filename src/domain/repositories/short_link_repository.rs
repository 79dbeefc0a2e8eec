//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short link already exists.
    /// Returns [`AppError::Storage`] on any other database error.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a short link by its code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on database errors.
    async fn find_by_short_link(&self, short_link: &str) -> Result<Option<ShortLink>, AppError>;

    /// Counts stored short links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
