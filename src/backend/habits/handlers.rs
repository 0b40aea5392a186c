/**
 * Habit Handlers
 *
 * # Endpoints
 *
 * - `GET /api/habits` - list the user's habits
 * - `POST /api/habits` - create a habit (quota checked when active)
 * - `GET /api/habits/{id}` - fetch one habit
 * - `PUT /api/habits/{id}` - partial update (quota checked on reactivation)
 * - `DELETE /api/habits/{id}` - delete a habit with its logs and reminders
 * - `GET /api/habits/{id}/next-reminder` - next reminder time
 *
 * # Quota
 *
 * The count of active habits and the write it guards run on one
 * `BEGIN IMMEDIATE` transaction, so concurrent creates take turns and
 * cannot both pass the check.
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::habits::db::{self, NewHabit};
use crate::backend::middleware::{parse_id, ApiJson, AuthUser};
use crate::backend::reminders;
use crate::backend::server::config::begin_write;
use crate::backend::server::state::AppState;
use crate::backend::subscription::ensure_can_activate;
use crate::shared::habit::{normalize_name, parse_calendar_date, parse_time_of_day, validate_day_of_month};
use crate::shared::schedule::{next_occurrence, ReminderSchedule};
use crate::shared::{ApiResponse, Category, DayOfWeek, Frequency, Habit, ReminderSlot, SharedError};

/// Create habit request
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateHabitRequest {
    pub name: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub reminder: Option<ReminderSlot>,
    pub reminder_time: Option<String>,
    pub reminder_date: Option<String>,
    pub reminder_frequency: Option<Frequency>,
    pub days_of_week: Option<Vec<DayOfWeek>>,
    pub day_of_month: Option<u32>,
    pub is_active: Option<bool>,
}

/// Update habit request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateHabitRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<Category>,
    pub frequency: Option<Frequency>,
    pub reminder: Option<ReminderSlot>,
    pub reminder_time: Option<String>,
    pub reminder_date: Option<String>,
    pub reminder_frequency: Option<Frequency>,
    pub days_of_week: Option<Vec<DayOfWeek>>,
    pub day_of_month: Option<u32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextReminderResponse {
    pub habit_id: Uuid,
    /// Wall-clock date-time of the next reminder, `null` when none is scheduled
    pub next_reminder: Option<NaiveDateTime>,
}

fn validated_time(value: Option<String>) -> Result<Option<String>, SharedError> {
    value
        .map(|t| parse_time_of_day("reminderTime", &t).map(|time| time.format("%H:%M").to_string()))
        .transpose()
}

fn validated_date(value: Option<String>) -> Result<Option<String>, SharedError> {
    value
        .map(|d| parse_calendar_date("reminderDate", &d).map(|date| date.to_string()))
        .transpose()
}

impl CreateHabitRequest {
    fn into_new_habit(self) -> Result<NewHabit, SharedError> {
        Ok(NewHabit {
            name: normalize_name(&self.name)?,
            description: self.description,
            notes: self.notes,
            category: self.category.unwrap_or_default(),
            frequency: self.frequency.unwrap_or_default(),
            reminder: self.reminder.unwrap_or_default(),
            reminder_time: validated_time(self.reminder_time)?,
            reminder_date: validated_date(self.reminder_date)?,
            reminder_frequency: self.reminder_frequency,
            days_of_week: self.days_of_week.unwrap_or_default(),
            day_of_month: self.day_of_month.map(validate_day_of_month).transpose()?,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

impl UpdateHabitRequest {
    fn apply_to(self, habit: &mut Habit) -> Result<(), SharedError> {
        if let Some(name) = self.name {
            habit.name = normalize_name(&name)?;
        }
        if let Some(description) = self.description {
            habit.description = Some(description);
        }
        if let Some(notes) = self.notes {
            habit.notes = Some(notes);
        }
        if let Some(category) = self.category {
            habit.category = category;
        }
        if let Some(frequency) = self.frequency {
            habit.frequency = frequency;
        }
        if let Some(reminder) = self.reminder {
            habit.reminder = reminder;
        }
        if self.reminder_time.is_some() {
            habit.reminder_time = validated_time(self.reminder_time)?;
        }
        if self.reminder_date.is_some() {
            habit.reminder_date = validated_date(self.reminder_date)?;
        }
        if let Some(frequency) = self.reminder_frequency {
            habit.reminder_frequency = Some(frequency);
        }
        if let Some(days) = self.days_of_week {
            habit.days_of_week = days;
        }
        if let Some(day) = self.day_of_month {
            habit.day_of_month = Some(validate_day_of_month(day)?);
        }
        if let Some(is_active) = self.is_active {
            habit.is_active = is_active;
        }
        Ok(())
    }
}

pub async fn list_habits(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Habit>>>, BackendError> {
    let pool = app_state.pool()?;
    let habits = db::list_habits(pool, user.user_id).await?;
    Ok(Json(ApiResponse::list(habits)))
}

/// Create a habit
///
/// # Errors
///
/// * `400 Bad Request` - empty name or malformed schedule fields
/// * `403 Forbidden` - the habit is active and the plan's quota is used up
pub async fn create_habit(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateHabitRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Habit>>), BackendError> {
    let pool = app_state.pool()?;
    let new_habit = request.into_new_habit()?;

    let mut tx = begin_write(pool).await?;
    if new_habit.is_active {
        ensure_can_activate(&mut tx, user.user_id).await?;
    }
    let habit = db::insert_habit(&mut *tx, user.user_id, &new_habit).await?;
    tx.commit().await?;

    tracing::info!("User {} created habit {} ({})", user.user_id, habit.id, habit.name);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Habit created successfully", habit)),
    ))
}

pub async fn get_habit(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Habit>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Habit")?;

    let habit = db::get_habit(pool, user.user_id, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Habit"))?;

    Ok(Json(ApiResponse::ok(habit)))
}

pub async fn update_habit(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdateHabitRequest>,
) -> Result<Json<ApiResponse<Habit>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Habit")?;

    let mut tx = begin_write(pool).await?;
    let mut habit = db::get_habit(&mut *tx, user.user_id, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Habit"))?;

    let was_active = habit.is_active;
    request.apply_to(&mut habit)?;

    if !was_active && habit.is_active {
        ensure_can_activate(&mut tx, user.user_id).await?;
    }

    let habit = db::update_habit(&mut *tx, &habit).await?;
    tx.commit().await?;

    tracing::info!("User {} updated habit {}", user.user_id, habit.id);

    Ok(Json(ApiResponse::with_message("Habit updated successfully", habit)))
}

pub async fn delete_habit(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Habit")?;

    let mut tx = begin_write(pool).await?;
    if !db::delete_habit(&mut *tx, user.user_id, id).await? {
        return Err(BackendError::not_found("Habit"));
    }
    let reminders_removed =
        reminders::db::delete_reminders_for_habit(&mut *tx, user.user_id, id).await?;
    tx.commit().await?;

    tracing::info!(
        "User {} deleted habit {} ({} reminders removed)",
        user.user_id,
        id,
        reminders_removed
    );

    Ok(Json(ApiResponse::with_message("Habit deleted successfully", ())))
}

pub async fn next_reminder(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NextReminderResponse>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Habit")?;

    let habit = db::get_habit(pool, user.user_id, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Habit"))?;

    let schedule = ReminderSchedule::from_habit(&habit)?;
    let next = if habit.is_active {
        next_occurrence(&schedule, Utc::now().naive_utc())
    } else {
        None
    };

    Ok(Json(ApiResponse::ok(NextReminderResponse {
        habit_id: habit.id,
        next_reminder: next,
    })))
}
