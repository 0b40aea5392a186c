//! Habit log types
//!
//! A log records that a habit was (or wasn't) completed on a calendar day.
//! Clients send either a plain `YYYY-MM-DD` date or a full RFC 3339
//! timestamp; both collapse to the UTC calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// A completion record for a habit on a given day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLog {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub user_id: Uuid,
    pub completed_date: NaiveDate,
    pub is_completed: bool,
    pub duration: i64,
    pub difficulty: Option<String>,
    pub mood: Option<String>,
    pub energy_level: Option<u8>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Parse a completion day from either a date or a timestamp.
pub fn parse_completed_date(value: &str) -> Result<NaiveDate, SharedError> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| {
            SharedError::validation("completedDate", "expected YYYY-MM-DD or an RFC 3339 timestamp")
        })
}

/// Serde adapter for optional completion days in request bodies.
pub fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| parse_completed_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

pub fn validate_energy_level(level: u8) -> Result<u8, SharedError> {
    if (1..=10).contains(&level) {
        Ok(level)
    } else {
        Err(SharedError::validation("energyLevel", "must be between 1 and 10"))
    }
}

pub fn validate_duration(minutes: i64) -> Result<i64, SharedError> {
    if minutes >= 0 {
        Ok(minutes)
    } else {
        Err(SharedError::validation("duration", "must not be negative"))
    }
}
