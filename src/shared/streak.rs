//! Streak counting for habit completions.
//!
//! Streaks are counted in calendar days. Only completions that move forward
//! in time affect the counters; a back-dated completion is recorded as a log
//! but leaves the streak alone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Streak counters stored on a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub current_streak: u32,
    pub best_streak: u32,
    pub last_completed_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn new(current_streak: u32, best_streak: u32, last_completed_date: Option<NaiveDate>) -> Self {
        Self {
            current_streak,
            best_streak,
            last_completed_date,
        }
    }
}

/// Apply a completion on `completed_on` to the existing streak.
///
/// - one day after the last completion: the streak grows by one
/// - same day: nothing changes
/// - a gap of more than a day, or no prior completion: the streak restarts at 1
/// - before the last completion: nothing changes
///
/// `best_streak` never decreases.
pub fn apply_completion(state: StreakState, completed_on: NaiveDate) -> StreakState {
    let current_streak = match state.last_completed_date {
        None => 1,
        Some(last) => match (completed_on - last).num_days() {
            d if d < 0 => return state,
            0 => state.current_streak,
            1 => state.current_streak.saturating_add(1),
            _ => 1,
        },
    };

    StreakState {
        current_streak,
        best_streak: state.best_streak.max(current_streak),
        last_completed_date: Some(completed_on),
    }
}
