/**
 * Habit Log Database Operations
 *
 * The `(habit_id, completed_date)` unique index is what enforces one log per
 * habit per day; [`insert_log`] surfaces a second log for the same day as a
 * unique violation for the caller to translate.
 */

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, FromRow, Row, Sqlite};
use uuid::Uuid;

use crate::shared::HabitLog;

const LOG_COLUMNS: &str = "id, habit_id, user_id, completed_date, is_completed, duration, \
     difficulty, mood, energy_level, notes, created_at";

/// Validated fields of a log about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewHabitLog {
    pub habit_id: Uuid,
    pub completed_date: chrono::NaiveDate,
    pub is_completed: bool,
    pub duration: i64,
    pub difficulty: Option<String>,
    pub mood: Option<String>,
    pub energy_level: Option<u8>,
    pub notes: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for HabitLog {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let energy_level: Option<i64> = row.try_get("energy_level")?;
        let energy_level = energy_level
            .map(u8::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "energy_level".to_string(),
                source: Box::new(e),
            })?;

        Ok(HabitLog {
            id: row.try_get("id")?,
            habit_id: row.try_get("habit_id")?,
            user_id: row.try_get("user_id")?,
            completed_date: row.try_get("completed_date")?,
            is_completed: row.try_get("is_completed")?,
            duration: row.try_get("duration")?,
            difficulty: row.try_get("difficulty")?,
            mood: row.try_get("mood")?,
            energy_level,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

pub async fn insert_log<'e, E>(executor: E, user_id: Uuid, log: &NewHabitLog) -> Result<HabitLog, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, HabitLog>(&format!(
        r#"
        INSERT INTO habit_logs (id, habit_id, user_id, completed_date, is_completed, duration,
            difficulty, mood, energy_level, notes, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {LOG_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(log.habit_id)
    .bind(user_id)
    .bind(log.completed_date)
    .bind(log.is_completed)
    .bind(log.duration)
    .bind(&log.difficulty)
    .bind(&log.mood)
    .bind(log.energy_level.map(i64::from))
    .bind(&log.notes)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
}

/// All of a user's logs, most recent day first
pub async fn list_logs<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<HabitLog>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, HabitLog>(&format!(
        "SELECT {LOG_COLUMNS} FROM habit_logs WHERE user_id = ? ORDER BY completed_date DESC, created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn list_logs_for_habit<'e, E>(
    executor: E,
    user_id: Uuid,
    habit_id: Uuid,
) -> Result<Vec<HabitLog>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, HabitLog>(&format!(
        "SELECT {LOG_COLUMNS} FROM habit_logs WHERE user_id = ? AND habit_id = ? ORDER BY completed_date DESC"
    ))
    .bind(user_id)
    .bind(habit_id)
    .fetch_all(executor)
    .await
}

pub async fn get_log<'e, E>(executor: E, user_id: Uuid, id: Uuid) -> Result<Option<HabitLog>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, HabitLog>(&format!(
        "SELECT {LOG_COLUMNS} FROM habit_logs WHERE id = ? AND user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

/// Write back the editable fields of `log`; the day and habit never change
pub async fn update_log<'e, E>(executor: E, log: &HabitLog) -> Result<HabitLog, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, HabitLog>(&format!(
        r#"
        UPDATE habit_logs
        SET is_completed = ?, duration = ?, difficulty = ?, mood = ?, energy_level = ?, notes = ?
        WHERE id = ? AND user_id = ?
        RETURNING {LOG_COLUMNS}
        "#
    ))
    .bind(log.is_completed)
    .bind(log.duration)
    .bind(&log.difficulty)
    .bind(&log.mood)
    .bind(log.energy_level.map(i64::from))
    .bind(&log.notes)
    .bind(log.id)
    .bind(log.user_id)
    .fetch_one(executor)
    .await
}

pub async fn delete_log<'e, E>(executor: E, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM habit_logs WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
