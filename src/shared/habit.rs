//! Habit types
//!
//! A habit is a user-owned recurring behavior. Besides descriptive fields it
//! carries reminder schedule metadata and the streak counters maintained by
//! [`crate::shared::streak`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Habit category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Other,
    Health,
    Fitness,
    Learning,
    Productivity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::Health => "health",
            Self::Fitness => "fitness",
            Self::Learning => "learning",
            Self::Productivity => "productivity",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "other" => Ok(Self::Other),
            "health" => Ok(Self::Health),
            "fitness" => Ok(Self::Fitness),
            "learning" => Ok(Self::Learning),
            "productivity" => Ok(Self::Productivity),
            other => Err(SharedError::unknown("category", other)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a habit (or its reminder) recurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(SharedError::unknown("frequency", other)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse part of the day a habit reminder targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReminderSlot {
    #[default]
    Morning,
    Afternoon,
    Evening,
}

impl ReminderSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl std::str::FromStr for ReminderSlot {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(SharedError::unknown("reminder", other)),
        }
    }
}

impl std::fmt::Display for ReminderSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week in the three-letter form used by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    pub fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Mon => chrono::Weekday::Mon,
            Self::Tue => chrono::Weekday::Tue,
            Self::Wed => chrono::Weekday::Wed,
            Self::Thu => chrono::Weekday::Thu,
            Self::Fri => chrono::Weekday::Fri,
            Self::Sat => chrono::Weekday::Sat,
            Self::Sun => chrono::Weekday::Sun,
        }
    }
}

impl std::str::FromStr for DayOfWeek {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mon" => Ok(Self::Mon),
            "tue" => Ok(Self::Tue),
            "wed" => Ok(Self::Wed),
            "thu" => Ok(Self::Thu),
            "fri" => Ok(Self::Fri),
            "sat" => Ok(Self::Sat),
            "sun" => Ok(Self::Sun),
            other => Err(SharedError::unknown("day of week", other)),
        }
    }
}

/// A tracked habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Category,
    pub frequency: Frequency,
    pub reminder: ReminderSlot,
    pub reminder_time: Option<String>,
    pub reminder_date: Option<String>,
    pub reminder_frequency: Option<Frequency>,
    pub days_of_week: Vec<DayOfWeek>,
    pub day_of_month: Option<u32>,
    pub is_active: bool,
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_completed_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trim a habit name and reject it when nothing is left.
pub fn normalize_name(name: &str) -> Result<String, SharedError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SharedError::validation("name", "name is required"));
    }
    Ok(trimmed.to_string())
}

pub fn validate_day_of_month(day: u32) -> Result<u32, SharedError> {
    if (1..=31).contains(&day) {
        Ok(day)
    } else {
        Err(SharedError::validation("dayOfMonth", "must be between 1 and 31"))
    }
}

/// Parse a `HH:MM` wall-clock time.
pub fn parse_time_of_day(field: &str, value: &str) -> Result<NaiveTime, SharedError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| SharedError::validation(field, "expected a time in HH:MM format"))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(field: &str, value: &str) -> Result<NaiveDate, SharedError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| SharedError::validation(field, "expected a date in YYYY-MM-DD format"))
}

/// Encode the weekday list for storage as a comma separated string.
pub fn encode_days(days: &[DayOfWeek]) -> String {
    days.iter().map(DayOfWeek::as_str).collect::<Vec<_>>().join(",")
}

pub fn decode_days(raw: &str) -> Result<Vec<DayOfWeek>, SharedError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
