//! Short link and QR id generation.
//!
//! Short links are 6 characters drawn uniformly, with replacement, from the
//! 62-character alphabet `[A-Za-z0-9]`. The random source is a single
//! [`StdRng`] seeded once from the operating system and shared behind a mutex,
//! so concurrent requests never reseed it.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

/// Number of characters in a generated short link.
pub const SHORT_LINK_LENGTH: usize = 6;

/// Codes that would shadow fixed routes.
const RESERVED_CODES: &[&str] = &["create", "health"];

/// Process-wide short link generator.
///
/// Construct one at startup and share it through [`crate::AppState`].
pub struct ShortLinkGenerator {
    rng: Mutex<StdRng>,
}

impl ShortLinkGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Creates a generator with a fixed seed. Output is reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Draws a fresh short link.
    ///
    /// No uniqueness check happens here; the primary key on `short_links`
    /// rejects collisions.
    pub fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            let code: String = (&mut *rng)
                .sample_iter(Alphanumeric)
                .take(SHORT_LINK_LENGTH)
                .map(char::from)
                .collect();

            if !RESERVED_CODES.contains(&code.as_str()) {
                return code;
            }
        }
    }
}

impl Default for ShortLinkGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a QR id (random UUID v4).
pub fn generate_qr_id() -> Uuid {
    Uuid::new_v4()
}

/// Returns true if `code` has the shape of a generated short link.
pub fn is_short_link(code: &str) -> bool {
    code.len() == SHORT_LINK_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
