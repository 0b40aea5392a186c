//! Progress report aggregation.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::habit::Habit;
use crate::shared::habit_log::HabitLog;

/// Window a report covers, ending today (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportRange {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

impl ReportRange {
    pub fn days(&self) -> i64 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 7,
            Self::Monthly => 30,
            Self::Yearly => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl std::str::FromStr for ReportRange {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(SharedError::unknown("date range", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub date_range: ReportRange,
    pub completion_rate: u32,
    pub total_completed: usize,
    pub total_habits: usize,
    pub average_streak: f64,
    pub best_streak: u32,
}

/// Aggregate a user's habits and logs over `range` ending on `today`.
///
/// Only active habits and completed logs count. The completion rate assumes
/// one expected completion per habit per day and is capped at 100.
pub fn summarize(habits: &[Habit], logs: &[HabitLog], range: ReportRange, today: NaiveDate) -> ReportSummary {
    let active: Vec<&Habit> = habits.iter().filter(|h| h.is_active).collect();
    let completed: Vec<&HabitLog> = logs
        .iter()
        .filter(|log| log.is_completed && active.iter().any(|h| h.id == log.habit_id))
        .collect();

    let window_start = today - Duration::days(range.days() - 1);
    let in_window = completed
        .iter()
        .filter(|log| log.completed_date >= window_start && log.completed_date <= today)
        .count();

    let expected = active.len() as i64 * range.days();
    let completion_rate = if expected > 0 {
        ((in_window as f64 / expected as f64) * 100.0).round().min(100.0) as u32
    } else {
        0
    };

    let average_streak = if active.is_empty() {
        0.0
    } else {
        let total: u32 = active.iter().map(|h| h.current_streak).sum();
        (f64::from(total) / active.len() as f64 * 10.0).round() / 10.0
    };

    ReportSummary {
        date_range: range,
        completion_rate,
        total_completed: completed.len(),
        total_habits: active.len(),
        average_streak,
        best_streak: active.iter().map(|h| h.best_streak).max().unwrap_or(0),
    }
}
