//! Habits Module
//!
//! Habit CRUD scoped to the authenticated user, plus the next-reminder
//! lookup. Creating an active habit and reactivating an inactive one are
//! checked against the user's habit quota (see `subscription::limits`).
//!
//! - **`db`** - Habit rows and queries
//! - **`handlers`** - HTTP handlers for `/api/habits`

pub mod db;
pub mod handlers;
