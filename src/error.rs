//! Error types for Todos.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=not_found, 4=validation, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output, shared by the CLI and the HTTP API
//! - HTTP status mapping via `actix_web::ResponseError`

use crate::validate::FieldErrors;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Result type alias for Todos operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    DatabaseError,

    // Not Found (exit 3)
    TodoNotFound,

    // Validation (exit 4)
    ValidationFailed,
    InvalidBody,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::DatabaseError => "DATABASE_ERROR",
            Self::TodoNotFound => "TODO_NOT_FOUND",
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::InvalidBody => "INVALID_BODY",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::DatabaseError => 2,
            Self::TodoNotFound => 3,
            Self::ValidationFailed | Self::InvalidBody => 4,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether the caller can succeed by retrying with corrected input.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed | Self::InvalidBody | Self::DatabaseError
        )
    }

    /// HTTP status used when this error ends a request.
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        match self {
            Self::TodoNotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed | Self::InvalidBody => StatusCode::BAD_REQUEST,
            Self::DatabaseError
            | Self::ConfigError
            | Self::IoError
            | Self::JsonError
            | Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Todos operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Todo not found: {id}")]
    TodoNotFound { id: String },

    #[error("Invalid input: {errors}")]
    Validation { errors: FieldErrors },

    #[error("Malformed request body: {0}")]
    InvalidBody(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a not-found error on a numeric id.
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::TodoNotFound { id: id.to_string() }
    }

    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::TodoNotFound { .. } => ErrorCode::TodoNotFound,
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::InvalidBody(_) => ErrorCode::InvalidBody,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::TodoNotFound { id } => Some(format!(
                "No todo with ID '{id}'. Use `todos list` to see available todos."
            )),
            Self::Validation { errors } if errors.contains("status") => {
                Some("Valid statuses: incomplete, complete".to_string())
            }
            Self::Validation { errors } if errors.contains("title") => Some(format!(
                "Titles must be 1-{} characters after trimming whitespace",
                crate::validate::TITLE_MAX_CHARS
            )),
            Self::InvalidBody(_) => {
                Some("Send a JSON object such as {\"title\": \"buy milk\"}".to_string())
            }
            Self::Config(_) => Some("Pass --db <path> or set TODOS_DB".to_string()),
            Self::Validation { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Validation errors carry a `fields` object mapping each offending
    /// field to its messages.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Self::Validation { errors } = self {
            obj["error"]["fields"] = serde_json::to_value(errors).unwrap_or_default();
        }

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation { errors }
    }
}

impl From<actix_web::error::BlockingError> for Error {
    fn from(err: actix_web::error::BlockingError) -> Self {
        Self::Other(format!("Storage task failed: {err}"))
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        self.error_code().http_status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        HttpResponse::build(self.status_code()).json(self.to_structured_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404_and_exit_3() {
        let err = Error::not_found(42);
        assert_eq!(err.to_string(), "Todo not found: 42");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.exit_code(), 3);
        assert!(!err.error_code().is_retryable());
    }

    #[test]
    fn test_validation_json_lists_fields() {
        let mut errors = FieldErrors::default();
        errors.add("title", "This field is required.");
        let err = Error::from(errors);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.exit_code(), 4);

        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(json["error"]["fields"]["title"][0], "This field is required.");
        assert!(json["error"]["hint"].as_str().unwrap().contains("1-255"));
    }

    #[test]
    fn test_status_hint_lists_choices() {
        let mut errors = FieldErrors::default();
        errors.add("status", "\"done\" is not a valid choice.");
        let err = Error::from(errors);
        assert_eq!(
            err.hint().as_deref(),
            Some("Valid statuses: incomplete, complete")
        );
    }

    #[test]
    fn test_database_error_is_internal_to_http() {
        let err = Error::Database(rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.exit_code(), 2);
        assert!(err.hint().is_none());
    }
}
