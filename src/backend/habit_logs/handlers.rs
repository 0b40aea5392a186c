/**
 * Habit Log Handlers
 *
 * # Endpoints
 *
 * - `GET /api/habitLogs` - all of the user's logs
 * - `GET /api/habitLogs/habit/{habitId}` - logs of one habit
 * - `POST /api/habitLogs` - record a completion
 * - `GET /api/habitLogs/{id}` / `PUT` / `DELETE`
 *
 * # Completion Flow
 *
 * 1. Validate the body and check the habit belongs to the user
 * 2. Insert the log; a second log for the same day is rejected with 400
 * 3. For completed logs, advance the habit's streak
 *
 * Step 3 is best-effort: a failure is logged and the created log is still
 * returned.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::habit_logs::db::{self, NewHabitLog};
use crate::backend::habits;
use crate::backend::middleware::{parse_id, ApiJson, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::habit_log::{deserialize_optional_day, validate_duration, validate_energy_level};
use crate::shared::{apply_completion, ApiResponse, Habit, HabitLog, SharedError, StreakState};

/// Create log request
///
/// `completedDate` accepts `YYYY-MM-DD` or an RFC 3339 timestamp and
/// defaults to today (UTC).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHabitLogRequest {
    pub habit_id: String,
    #[serde(default, deserialize_with = "deserialize_optional_day")]
    pub completed_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: Option<bool>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub energy_level: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update log request; the habit and the day cannot be changed
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateHabitLogRequest {
    pub is_completed: Option<bool>,
    pub duration: Option<i64>,
    pub difficulty: Option<String>,
    pub mood: Option<String>,
    pub energy_level: Option<u8>,
    pub notes: Option<String>,
}

impl CreateHabitLogRequest {
    fn into_new_log(self, habit_id: Uuid, today: NaiveDate) -> Result<NewHabitLog, SharedError> {
        Ok(NewHabitLog {
            habit_id,
            completed_date: self.completed_date.unwrap_or(today),
            is_completed: self.is_completed.unwrap_or(true),
            duration: validate_duration(self.duration.unwrap_or(0))?,
            difficulty: self.difficulty,
            mood: self.mood,
            energy_level: self.energy_level.map(validate_energy_level).transpose()?,
            notes: self.notes,
        })
    }
}

impl UpdateHabitLogRequest {
    fn apply_to(self, log: &mut HabitLog) -> Result<(), SharedError> {
        if let Some(is_completed) = self.is_completed {
            log.is_completed = is_completed;
        }
        if let Some(duration) = self.duration {
            log.duration = validate_duration(duration)?;
        }
        if let Some(difficulty) = self.difficulty {
            log.difficulty = Some(difficulty);
        }
        if let Some(mood) = self.mood {
            log.mood = Some(mood);
        }
        if let Some(level) = self.energy_level {
            log.energy_level = Some(validate_energy_level(level)?);
        }
        if let Some(notes) = self.notes {
            log.notes = Some(notes);
        }
        Ok(())
    }
}

/// Advance a habit's streak for a completion on `completed_on`
///
/// Returns the new counters, or `None` when they did not change.
pub async fn record_completion(
    pool: &SqlitePool,
    habit: &Habit,
    completed_on: NaiveDate,
) -> Result<Option<StreakState>, sqlx::Error> {
    let current = StreakState::new(habit.current_streak, habit.best_streak, habit.last_completed_date);
    let next = apply_completion(current, completed_on);

    if next == current {
        return Ok(None);
    }

    habits::db::update_streak(pool, habit.id, &next).await?;
    Ok(Some(next))
}

pub async fn list_logs(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<HabitLog>>>, BackendError> {
    let pool = app_state.pool()?;
    let logs = db::list_logs(pool, user.user_id).await?;
    Ok(Json(ApiResponse::list(logs)))
}

pub async fn list_habit_logs(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(habit_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<HabitLog>>>, BackendError> {
    let pool = app_state.pool()?;
    let habit_id = parse_id(&habit_id, "Habit")?;

    if habits::db::get_habit(pool, user.user_id, habit_id).await?.is_none() {
        return Err(BackendError::not_found("Habit"));
    }

    let logs = db::list_logs_for_habit(pool, user.user_id, habit_id).await?;
    Ok(Json(ApiResponse::list(logs)))
}

/// Record a completion
///
/// # Errors
///
/// * `400 Bad Request` - invalid fields, or the habit already has a log for that day
/// * `404 Not Found` - the habit does not exist or belongs to someone else
pub async fn create_log(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateHabitLogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<HabitLog>>), BackendError> {
    let pool = app_state.pool()?;
    let habit_id = parse_id(&request.habit_id, "Habit")?;
    let new_log = request.into_new_log(habit_id, Utc::now().date_naive())?;

    let habit = habits::db::get_habit(pool, user.user_id, habit_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Habit"))?;

    let log = db::insert_log(pool, user.user_id, &new_log)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::DuplicateCompletion
            } else {
                e.into()
            }
        })?;

    tracing::info!(
        "User {} logged habit {} for {}",
        user.user_id,
        habit.id,
        log.completed_date
    );

    if log.is_completed {
        match record_completion(pool, &habit, log.completed_date).await {
            Ok(Some(streak)) => tracing::debug!(
                "Habit {} streak now {} (best {})",
                habit.id,
                streak.current_streak,
                streak.best_streak
            ),
            Ok(None) => {}
            Err(e) => tracing::error!("Failed to update streak for habit {}: {:?}", habit.id, e),
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Habit log created successfully", log)),
    ))
}

pub async fn get_log(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<HabitLog>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Habit log")?;

    let log = db::get_log(pool, user.user_id, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Habit log"))?;
    Ok(Json(ApiResponse::ok(log)))
}

/// Update a log's details
///
/// Streak counters are not recomputed.
pub async fn update_log(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateHabitLogRequest>,
) -> Result<Json<ApiResponse<HabitLog>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Habit log")?;

    let mut log = db::get_log(pool, user.user_id, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Habit log"))?;
    request.apply_to(&mut log)?;

    let log = db::update_log(pool, &log).await?;
    Ok(Json(ApiResponse::with_message("Habit log updated successfully", log)))
}

pub async fn delete_log(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Habit log")?;

    if !db::delete_log(pool, user.user_id, id).await? {
        return Err(BackendError::not_found("Habit log"));
    }

    tracing::info!("User {} deleted habit log {}", user.user_id, id);
    Ok(Json(ApiResponse::with_message("Habit log deleted successfully", ())))
}
