//! Reminders Module
//!
//! Display-only reminder entries attached to habits. The backend stores
//! them and returns them; scheduling and delivery happen in the client.

pub mod db;
pub mod handlers;
