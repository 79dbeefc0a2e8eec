//! Helpers shared by the service and HTTP layers.
//!
//! - [`code_generator`] - Short link and QR id generation
//! - [`client_info`] - Requester IP, user agent and host extraction
//! - [`db_error`] - Database error classification

pub mod client_info;
pub mod code_generator;
pub mod db_error;
