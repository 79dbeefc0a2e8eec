//! Short link creation and lookup service.

use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{ShortLinkGenerator, is_short_link};
use serde_json::json;
use tracing::{info, warn};

/// How many codes are drawn before a run of collisions becomes an error.
const MAX_ATTEMPTS: usize = 5;

/// Service for creating short links and resolving them back to long URLs.
pub struct LinkService {
    repository: Arc<dyn ShortLinkRepository>,
    generator: Arc<ShortLinkGenerator>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        generator: Arc<ShortLinkGenerator>,
    ) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Generates a short link for `long_url` and stores it.
    ///
    /// # Collisions
    ///
    /// The primary key rejects duplicate codes. On a collision a new code is
    /// drawn, up to [`MAX_ATTEMPTS`] times in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is blank.
    /// Returns [`AppError::Storage`] if the insert fails or every attempt collides.
    pub async fn create_short_link(
        &self,
        long_url: &str,
        ip: String,
        user_agent: Option<String>,
    ) -> Result<ShortLink, AppError> {
        let long_url = require_long_url(long_url)?;

        for attempt in 1..=MAX_ATTEMPTS {
            let new_link = NewShortLink {
                short_link: self.generator.generate(),
                long_url: long_url.to_string(),
                ip: ip.clone(),
                user_agent: user_agent.clone(),
            };

            match self.repository.create(new_link).await {
                Ok(link) => {
                    info!(short_link = %link.short_link, "Short link created");
                    return Ok(link);
                }
                Err(AppError::Conflict { details, .. }) => {
                    warn!(attempt, details = %details, "Short link collision, drawing again");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::storage(
            "Failed to store short link",
            json!({ "reason": "Too many collisions", "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Retrieves the stored record for `short_link`.
    ///
    /// Codes that cannot have been generated are rejected without a query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    pub async fn get_short_link(&self, short_link: &str) -> Result<ShortLink, AppError> {
        let not_found =
            || AppError::not_found("Short link not found", json!({ "short_link": short_link }));

        if !is_short_link(short_link) {
            return Err(not_found());
        }

        self.repository
            .find_by_short_link(short_link)
            .await?
            .ok_or_else(not_found)
    }

    /// Resolves `short_link` to its long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches.
    pub async fn long_url_for(&self, short_link: &str) -> Result<String, AppError> {
        self.get_short_link(short_link)
            .await
            .map(|link| link.long_url)
    }

    /// Builds the public URL for a short link.
    pub fn short_url(&self, base_url: &str, short_link: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_link)
    }

    /// Checks that the backing store answers.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Trims `long_url` and rejects it if nothing is left.
pub(crate) fn require_long_url(long_url: &str) -> Result<&str, AppError> {
    let trimmed = long_url.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request("Missing long URL", json!({})));
    }
    Ok(trimmed)
}
