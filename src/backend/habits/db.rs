/**
 * Habit Database Operations
 *
 * Habits are always addressed together with their owner; a habit id that
 * belongs to another user behaves exactly like a missing one.
 *
 * Enum columns are stored as their lowercase names and `days_of_week` as a
 * comma separated list (`mon,wed,fri`).
 */

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, FromRow, Row, Sqlite};
use uuid::Uuid;

use crate::shared::habit::{decode_days, encode_days};
use crate::shared::{Category, DayOfWeek, Frequency, Habit, ReminderSlot, StreakState};

const HABIT_COLUMNS: &str = "id, user_id, name, description, notes, category, frequency, reminder, \
     reminder_time, reminder_date, reminder_frequency, days_of_week, day_of_month, is_active, \
     current_streak, best_streak, last_completed_date, created_at, updated_at";

/// Validated fields of a habit about to be inserted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewHabit {
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
}

fn decode_error(column: &str, source: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

fn non_negative(column: &str, value: i64) -> Result<u32, sqlx::Error> {
    u32::try_from(value).map_err(|e| decode_error(column, e))
}

impl<'r> FromRow<'r, SqliteRow> for Habit {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let category: String = row.try_get("category")?;
        let frequency: String = row.try_get("frequency")?;
        let reminder: String = row.try_get("reminder")?;
        let reminder_frequency: Option<String> = row.try_get("reminder_frequency")?;
        let days_of_week: String = row.try_get("days_of_week")?;
        let day_of_month: Option<i64> = row.try_get("day_of_month")?;

        Ok(Habit {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            notes: row.try_get("notes")?,
            category: category.parse().map_err(|e| decode_error("category", e))?,
            frequency: frequency.parse().map_err(|e| decode_error("frequency", e))?,
            reminder: reminder.parse().map_err(|e| decode_error("reminder", e))?,
            reminder_time: row.try_get("reminder_time")?,
            reminder_date: row.try_get("reminder_date")?,
            reminder_frequency: reminder_frequency
                .map(|f| f.parse())
                .transpose()
                .map_err(|e| decode_error("reminder_frequency", e))?,
            days_of_week: decode_days(&days_of_week).map_err(|e| decode_error("days_of_week", e))?,
            day_of_month: day_of_month
                .map(|d| non_negative("day_of_month", d))
                .transpose()?,
            is_active: row.try_get("is_active")?,
            current_streak: non_negative("current_streak", row.try_get("current_streak")?)?,
            best_streak: non_negative("best_streak", row.try_get("best_streak")?)?,
            last_completed_date: row.try_get::<Option<NaiveDate>, _>("last_completed_date")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

pub async fn insert_habit<'e, E>(executor: E, user_id: Uuid, habit: &NewHabit) -> Result<Habit, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    sqlx::query_as::<_, Habit>(&format!(
        r#"
        INSERT INTO habits (id, user_id, name, description, notes, category, frequency, reminder,
            reminder_time, reminder_date, reminder_frequency, days_of_week, day_of_month, is_active,
            current_streak, best_streak, last_completed_date, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, NULL, ?, ?)
        RETURNING {HABIT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&habit.name)
    .bind(&habit.description)
    .bind(&habit.notes)
    .bind(habit.category.as_str())
    .bind(habit.frequency.as_str())
    .bind(habit.reminder.as_str())
    .bind(&habit.reminder_time)
    .bind(&habit.reminder_date)
    .bind(habit.reminder_frequency.map(|f| f.as_str()))
    .bind(encode_days(&habit.days_of_week))
    .bind(habit.day_of_month.map(i64::from))
    .bind(habit.is_active)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

/// All of a user's habits, newest first
pub async fn list_habits<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<Habit>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Habit>(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits WHERE user_id = ? ORDER BY created_at DESC"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

pub async fn get_habit<'e, E>(executor: E, user_id: Uuid, id: Uuid) -> Result<Option<Habit>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Habit>(&format!(
        "SELECT {HABIT_COLUMNS} FROM habits WHERE id = ? AND user_id = ?"
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(executor)
    .await
}

pub async fn count_active_habits<'e, E>(executor: E, user_id: Uuid) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM habits WHERE user_id = ? AND is_active = 1")
            .bind(user_id)
            .fetch_one(executor)
            .await?;
    Ok(count)
}

/// Write back the editable fields of `habit`
///
/// Streak counters are left alone; they only change through [`update_streak`].
pub async fn update_habit<'e, E>(executor: E, habit: &Habit) -> Result<Habit, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Habit>(&format!(
        r#"
        UPDATE habits
        SET name = ?, description = ?, notes = ?, category = ?, frequency = ?, reminder = ?,
            reminder_time = ?, reminder_date = ?, reminder_frequency = ?, days_of_week = ?,
            day_of_month = ?, is_active = ?, updated_at = ?
        WHERE id = ? AND user_id = ?
        RETURNING {HABIT_COLUMNS}
        "#
    ))
    .bind(&habit.name)
    .bind(&habit.description)
    .bind(&habit.notes)
    .bind(habit.category.as_str())
    .bind(habit.frequency.as_str())
    .bind(habit.reminder.as_str())
    .bind(&habit.reminder_time)
    .bind(&habit.reminder_date)
    .bind(habit.reminder_frequency.map(|f| f.as_str()))
    .bind(encode_days(&habit.days_of_week))
    .bind(habit.day_of_month.map(i64::from))
    .bind(habit.is_active)
    .bind(Utc::now())
    .bind(habit.id)
    .bind(habit.user_id)
    .fetch_one(executor)
    .await
}

/// Store new streak counters for a habit
pub async fn update_streak<'e, E>(executor: E, habit_id: Uuid, streak: &StreakState) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE habits
        SET current_streak = ?, best_streak = ?, last_completed_date = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(i64::from(streak.current_streak))
    .bind(i64::from(streak.best_streak))
    .bind(streak.last_completed_date)
    .bind(Utc::now())
    .bind(habit_id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Delete a habit, returning whether it existed
///
/// Its logs go with it through the foreign key.
pub async fn delete_habit<'e, E>(executor: E, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM habits WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
