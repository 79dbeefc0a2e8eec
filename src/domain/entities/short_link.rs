//! Short link entity mapping a generated code to a long URL.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// Created once on a create request and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub short_link: String,
    pub long_url: String,
    pub create_time: DateTime<Utc>,
    pub ip: String,
    pub user_agent: Option<String>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        short_link: String,
        long_url: String,
        create_time: DateTime<Utc>,
        ip: String,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            short_link,
            long_url,
            create_time,
            ip,
            user_agent,
        }
    }
}

/// Input data for inserting a short link. `create_time` is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub short_link: String,
    pub long_url: String,
    pub ip: String,
    pub user_agent: Option<String>,
}

impl NewShortLink {
    /// Turns the insert request into a stored record.
    pub fn into_short_link(self, create_time: DateTime<Utc>) -> ShortLink {
        ShortLink::new(
            self.short_link,
            self.long_url,
            create_time,
            self.ip,
            self.user_agent,
        )
    }
}
