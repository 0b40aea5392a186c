//! Backend Error Module
//!
//! This module defines the error type returned by every HTTP handler and
//! its conversion into a JSON response.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError` definition, constructors and status mapping
//! - **`conversion`** - `IntoResponse` and database error translation
//!
//! # Response Format
//!
//! ```json
//! { "success": false, "message": "Habit not found", "status": 404 }
//! ```
//!
//! Database and internal failures are logged in full and answered with a
//! generic message.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::is_unique_violation;
pub use types::BackendError;
