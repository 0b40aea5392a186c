//! Shared Module
//!
//! This module contains the domain types and the pure business rules of the
//! habit tracker. Nothing in here performs I/O; the backend feeds database
//! rows in and serializes the results out.
//!
//! # Overview
//!
//! - **`habit`**, **`habit_log`**, **`reminder`** - record types and field validation
//! - **`plan`** - subscription plans and the habit limit policy
//! - **`streak`** - streak counting for completions
//! - **`schedule`** - next reminder occurrence for a habit
//! - **`report`** - completion-rate and streak aggregation
//! - **`api`** - the JSON success envelope
//! - **`error`** - shared error types

/// Habit record and its enums
pub mod habit;

/// Habit completion logs
pub mod habit_log;

/// Reminder records
pub mod reminder;

/// Subscription plans and the habit limit policy
pub mod plan;

/// Streak counting
pub mod streak;

/// Reminder schedule evaluation
pub mod schedule;

/// Report aggregation
pub mod report;

/// Response envelope
pub mod api;

/// Shared error types
pub mod error;

/// Re-export commonly used types for convenience
pub use api::ApiResponse;
pub use error::SharedError;
pub use habit::{Category, DayOfWeek, Frequency, Habit, ReminderSlot};
pub use habit_log::HabitLog;
pub use plan::{habit_limit, HabitLimit, PlanType};
pub use reminder::Reminder;
pub use streak::{apply_completion, StreakState};
