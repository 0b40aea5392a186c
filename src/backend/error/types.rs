/**
 * Backend Error Types
 *
 * This module defines `BackendError`, the error returned by every handler.
 *
 * # Status Code Mapping
 *
 * | Variant               | Status |
 * |-----------------------|--------|
 * | `HandlerError`        | as given |
 * | `Validation`          | 400 |
 * | `DuplicateCompletion` | 400 |
 * | `Unauthorized`        | 401 |
 * | `HabitLimitReached`   | 403 |
 * | `NotFound`            | 404 |
 * | `DatabaseUnavailable` | 503 |
 * | `Database`            | 500 |
 * | `Internal`            | 500 |
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Message used for every 500 response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message returned when a log already exists for the habit and day
pub const DUPLICATE_COMPLETION_MESSAGE: &str =
    "This habit has already been completed for this date";

/// Backend-specific error types
///
/// ```rust
/// use axum::http::StatusCode;
/// use streakly::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::not_found("Habit");
/// assert_eq!(err.message(), "Habit not found");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (bad request body, duplicate email, ...)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Field-level validation failure from the shared domain types
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Missing, malformed or expired credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The resource does not exist or belongs to another user
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// Creating or reactivating a habit would exceed the plan's quota
    #[error("{message}")]
    HabitLimitReached { message: String },

    /// A log already exists for this habit and calendar day
    #[error("{}", DUPLICATE_COMPLETION_MESSAGE)]
    DuplicateCompletion,

    /// The server started without a database
    #[error("Database is not available")]
    DatabaseUnavailable,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Shorthand for a 400 handler error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Validation(_) | Self::DuplicateCompletion => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::HabitLimitReached { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// Server-side failures never expose their cause here.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Validation(SharedError::ValidationError { field, message }) => {
                format!("{}: {}", field, message)
            }
            Self::Validation(err) => err.to_string(),
            Self::Unauthorized { message } => message.clone(),
            Self::HabitLimitReached { message } => message.clone(),
            Self::Database(_) | Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether this error is a server-side failure that must be logged
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}
