//! Backend Module
//!
//! This module contains all server-side code for Streakly. It provides an
//! Axum HTTP server over a SQLite database managed through sqlx.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Router assembly
//! - **`middleware`** - Bearer-token authentication, JSON extraction
//! - **`error`** - `BackendError` and its HTTP conversion
//! - **`auth`** - Users, tokens, register/login/profile handlers
//! - **`subscription`** - Plans, the habit quota check, subscription handlers
//! - **`habits`** - Habit CRUD and next-reminder lookup
//! - **`habit_logs`** - Completion logs, duplicate guard, streak updates
//! - **`reminders`** - Reminder listing and rescheduling
//! - **`reports`** - Progress report endpoint
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state and initialization
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware and extractors
//! ├── error/          - Error types
//! ├── auth/           - Authentication
//! ├── subscription/   - Plans and habit limits
//! ├── habits/         - Habits
//! ├── habit_logs/     - Habit logs
//! ├── reminders/      - Reminders
//! └── reports/        - Reports
//! ```
//!
//! # Concurrency
//!
//! Handlers share nothing but the connection pool and the immutable server
//! configuration held in `AppState`. The habit quota check and the insert it
//! guards run in one transaction; streak updates are best-effort.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Middleware for request processing
pub mod middleware;

/// Authentication and user management
pub mod auth;

/// Subscription plans and habit limits
pub mod subscription;

/// Habit management
pub mod habits;

/// Habit completion logs
pub mod habit_logs;

/// Reminders
pub mod reminders;

/// Progress reports
pub mod reports;

#[cfg(test)]
pub(crate) mod test_support;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{create_app, AppState};
