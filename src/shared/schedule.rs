//! Reminder schedule evaluation.
//!
//! A habit's reminder fields describe a recurring wall-clock time. This
//! module turns them into the next concrete date-time after a given instant,
//! which the frontend uses for its countdown.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::shared::error::SharedError;
use crate::shared::habit::{parse_calendar_date, parse_time_of_day, DayOfWeek, Frequency, Habit};

/// Parsed reminder settings of a habit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSchedule {
    pub frequency: Option<Frequency>,
    pub time: Option<NaiveTime>,
    pub days_of_week: Vec<DayOfWeek>,
    pub day_of_month: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl ReminderSchedule {
    pub fn from_habit(habit: &Habit) -> Result<Self, SharedError> {
        let time = habit
            .reminder_time
            .as_deref()
            .map(|t| parse_time_of_day("reminderTime", t))
            .transpose()?;
        let date = habit
            .reminder_date
            .as_deref()
            .map(|d| parse_calendar_date("reminderDate", d))
            .transpose()?;

        Ok(Self {
            frequency: habit.reminder_frequency,
            time,
            days_of_week: habit.days_of_week.clone(),
            day_of_month: habit.day_of_month,
            date,
        })
    }
}

/// Next time the reminder fires strictly after `now`, if it ever does.
pub fn next_occurrence(schedule: &ReminderSchedule, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let time = schedule.time?;
    let today = now.date();

    match schedule.frequency {
        Some(Frequency::Daily) => {
            let candidate = today.and_time(time);
            if candidate > now {
                Some(candidate)
            } else {
                Some(candidate + Duration::days(1))
            }
        }
        Some(Frequency::Weekly) => (0..=7)
            .map(|offset| today + Duration::days(offset))
            .filter(|d| schedule.days_of_week.iter().any(|w| w.to_chrono() == d.weekday()))
            .map(|d| d.and_time(time))
            .find(|candidate| *candidate > now),
        Some(Frequency::Monthly) => {
            let day = schedule.day_of_month?;
            (0..=1)
                .map(|offset| add_months(today.year(), today.month(), offset))
                .map(|(y, m)| clamp_to_month(y, m, day))
                .map(|d| d.and_time(time))
                .find(|candidate| *candidate > now)
        }
        None => schedule
            .date
            .map(|d| d.and_time(time))
            .filter(|candidate| *candidate > now),
    }
}

fn add_months(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let zero_based = month - 1 + offset;
    (year + (zero_based / 12) as i32, zero_based % 12 + 1)
}

/// `day` in the given month, pulled back to the month's last day if needed.
fn clamp_to_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let (next_year, next_month) = add_months(year, month, 1);
    let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28);
    NaiveDate::from_ymd_opt(year, month, day.min(last_day))
        .unwrap_or(NaiveDate::MIN)
}
