//! HTTP layer for redirects, images and health.
//!
//! # Modules
//!
//! - [`dto`] - Request forms and response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and panic boundary

pub mod dto;
pub mod handlers;
pub mod middleware;
