//! Habit Logs Module
//!
//! Dated completion records. At most one log exists per habit and calendar
//! day; completed logs advance the habit's streak counters.
//!
//! - **`db`** - Log rows and queries
//! - **`handlers`** - HTTP handlers for `/api/habitLogs`

pub mod db;
pub mod handlers;
