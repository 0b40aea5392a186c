//! Shared Error Types
//!
//! This module defines the errors produced by the domain types and pure
//! business rules in `shared`. They carry no HTTP knowledge; the backend
//! maps them onto status codes.
//!
//! # Error Categories
//!
//! - `ValidationError` - A field failed validation (bad range, empty name, ...)
//! - `UnknownVariant` - A string did not name a known enum value
//!
//! # Usage
//!
//! ```rust
//! use streakly::shared::error::SharedError;
//!
//! let error = SharedError::validation("dayOfMonth", "must be between 1 and 31");
//! ```
use thiserror::Error;

/// Errors raised by shared domain code
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// A string did not match any variant of a closed set
    #[error("Invalid {kind}: '{value}'")]
    UnknownVariant {
        /// Which set was being parsed (category, frequency, ...)
        kind: &'static str,
        /// The rejected input
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-variant error
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
