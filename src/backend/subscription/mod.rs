//! Subscription Module
//!
//! Subscriptions record which plan a user is on. The most recent active
//! subscription, together with the user's pro flag, decides how many active
//! habits the user may hold.
//!
//! # Architecture
//!
//! - **`db`** - Subscription records
//! - **`limits`** - Quota lookup and enforcement for habit creation and reactivation
//! - **`api`** - HTTP handlers for `/api/subscriptions`

/// Subscription records
pub mod db;

/// Habit quota enforcement
pub mod limits;

/// HTTP handlers
pub mod api;

pub use limits::{ensure_can_activate, load_quota, HabitQuota};
