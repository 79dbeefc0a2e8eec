//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; PostgreSQL implementations
//! live in `crate::infrastructure::persistence`. Mock implementations are
//! generated via `mockall` for unit tests.
//!
//! - [`ShortLinkRepository`] - Short link storage and lookup
//! - [`QrCodeRepository`] - QR code record storage and lookup
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod qr_code_repository;
pub mod short_link_repository;

pub use qr_code_repository::QrCodeRepository;
pub use short_link_repository::ShortLinkRepository;

#[cfg(test)]
pub use qr_code_repository::MockQrCodeRepository;
#[cfg(test)]
pub use short_link_repository::MockShortLinkRepository;
