//! Application error type and its HTTP mapping.
//!
//! Every failure inside a request is an [`AppError`]. The variant decides the
//! status code; the message and details are logged, and only 4xx messages are
//! ever shown to the client.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::utils::db_error::is_unique_violation;

/// Body returned for every 5xx response.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or invalid client input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short link or QR id.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Unique-key violation on insert.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Insert or query failure.
    #[error("{message}")]
    Storage { message: String, details: Value },

    /// QR symbol or PNG encoding failure.
    #[error("{message}")]
    Encode { message: String, details: Value },

    /// File I/O failure in the content directory.
    #[error("{message}")]
    Io { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }
    pub fn encode(message: impl Into<String>, details: Value) -> Self {
        Self::Encode {
            message: message.into(),
            details,
        }
    }
    pub fn io(message: impl Into<String>, details: Value) -> Self {
        Self::Io {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code, used as a log field.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Storage { .. } => "storage_error",
            AppError::Encode { .. } => "encode_error",
            AppError::Io { .. } => "io_error",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. }
            | AppError::Storage { .. }
            | AppError::Encode { .. }
            | AppError::Io { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::Storage { details, .. }
            | AppError::Encode { details, .. }
            | AppError::Io { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// Message safe to send to the client.
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                details = %self.details(),
                "{}",
                self
            );
        } else {
            tracing::debug!(
                code = self.code(),
                details = %self.details(),
                "{}",
                self
            );
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            let constraint = e
                .as_database_error()
                .and_then(|db| db.constraint())
                .map(str::to_string);
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            );
        }

        AppError::storage("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::io(
            "File system error",
            json!({ "kind": e.kind().to_string(), "reason": e.to_string() }),
        )
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": errors.to_string() }))
    }
}
