//! Data Transfer Objects for requests and responses.
//!
//! Forms use Serde for deserialization and validator for input validation.

pub mod create;
pub mod health;
