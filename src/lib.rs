//! Streakly - Main Library
//!
//! Streakly is a habit-tracking backend built with Rust. Users register,
//! define habits, log daily completions and get streaks, reminders and
//! reports back, with the number of active habits bounded by their plan.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Domain types and pure business rules
//!   - Habit, log, reminder and subscription types
//!   - Habit limit policy, streak updater, reminder schedule, report summary
//!   - API envelope and shared error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and router
//!   - Bearer-token authentication backed by a token table
//!   - SQLite persistence through sqlx
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules (on by default)
//!
//! # Usage
//!
//! ```rust,no_run
//! use streakly::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let app = create_app(&config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Business Rules
//!
//! The interesting logic lives in `shared` and is free of I/O:
//!
//! - [`shared::plan::habit_limit`] maps a pro flag and an active plan to a quota
//! - [`shared::streak::apply_completion`] advances a habit's streak counters
//! - [`shared::schedule::next_occurrence`] computes the next reminder time
//! - [`shared::report::summarize`] aggregates habits and logs into a report
//!
//! The backend wires these rules into HTTP handlers and database transactions.

/// Shared types and business rules
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
