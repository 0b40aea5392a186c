//! Reminder records
//!
//! Reminders are display-only: the backend stores and returns them, the
//! frontend renders the countdown. They reference a habit weakly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A per-habit reminder entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub reminder_id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    /// Display label, usually the habit name at creation time
    pub habit: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub time_of_day: Option<String>,
    pub channel: Option<String>,
    pub tone: Option<String>,
    pub is_enabled: bool,
    pub created_at: DateTime<Utc>,
}
