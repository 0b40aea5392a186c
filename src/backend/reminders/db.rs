/**
 * Reminder Database Operations
 */

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, FromRow, Row, Sqlite};
use uuid::Uuid;

use crate::shared::Reminder;

const REMINDER_COLUMNS: &str =
    "id, habit_id, user_id, habit, date, time, time_of_day, channel, tone, is_enabled, created_at";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewReminder {
    pub habit_id: Uuid,
    pub habit: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub time_of_day: Option<String>,
    pub channel: Option<String>,
    pub tone: Option<String>,
    pub is_enabled: bool,
}

impl<'r> FromRow<'r, SqliteRow> for Reminder {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Reminder {
            reminder_id: row.try_get("id")?,
            habit_id: row.try_get("habit_id")?,
            user_id: row.try_get("user_id")?,
            habit: row.try_get("habit")?,
            date: row.try_get("date")?,
            time: row.try_get("time")?,
            time_of_day: row.try_get("time_of_day")?,
            channel: row.try_get("channel")?,
            tone: row.try_get("tone")?,
            is_enabled: row.try_get("is_enabled")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

pub async fn insert_reminder<'e, E>(executor: E, user_id: Uuid, reminder: &NewReminder) -> Result<Reminder, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Reminder>(&format!(
        r#"
        INSERT INTO reminders (id, habit_id, user_id, habit, date, time, time_of_day, channel, tone,
            is_enabled, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {REMINDER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(reminder.habit_id)
    .bind(user_id)
    .bind(&reminder.habit)
    .bind(&reminder.date)
    .bind(&reminder.time)
    .bind(&reminder.time_of_day)
    .bind(&reminder.channel)
    .bind(&reminder.tone)
    .bind(reminder.is_enabled)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

/// All of a user's reminders, newest first
pub async fn list_reminders<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<Reminder>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Reminder>(&format!(
        "SELECT {REMINDER_COLUMNS} FROM reminders WHERE user_id = ? ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Move a reminder to a new date and time
pub async fn reschedule_reminder<'e, E>(
    executor: E,
    user_id: Uuid,
    id: Uuid,
    date: &str,
    time: &str,
) -> Result<Option<Reminder>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Reminder>(&format!(
        r#"
        UPDATE reminders SET date = ?, time = ?
        WHERE id = ? AND user_id = ?
        RETURNING {REMINDER_COLUMNS}
        "#
    ))
    .bind(date)
    .bind(time)
    .bind(id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn delete_reminder<'e, E>(executor: E, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM reminders WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove the reminders attached to a habit, returning how many went
pub async fn delete_reminders_for_habit<'e, E>(
    executor: E,
    user_id: Uuid,
    habit_id: Uuid,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM reminders WHERE habit_id = ? AND user_id = ?")
        .bind(habit_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
