//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters.
//!
//! - [`PgShortLinkRepository`] - Short link storage and retrieval
//! - [`PgQrCodeRepository`] - QR code record storage and retrieval

pub mod pg_qr_code_repository;
pub mod pg_short_link_repository;

pub use pg_qr_code_repository::PgQrCodeRepository;
pub use pg_short_link_repository::PgShortLinkRepository;
