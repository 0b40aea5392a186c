/**
 * Reminder Handlers
 *
 * - `GET /api/reminders/all` - the user's reminders, newest first
 * - `PUT /api/reminders/update` - move a reminder to a new date and time
 * - `POST /api/reminders` - add a reminder to one of the user's habits
 * - `DELETE /api/reminders/{id}`
 */

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::habits;
use crate::backend::middleware::{parse_id, ApiJson, AuthUser};
use crate::backend::reminders::db::{self, NewReminder};
use crate::backend::server::state::AppState;
use crate::shared::habit::{parse_calendar_date, parse_time_of_day};
use crate::shared::{ApiResponse, Reminder};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleReminderRequest {
    #[serde(default)]
    pub reminder_id: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub habit_id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub time_of_day: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub is_enabled: Option<bool>,
}

fn normalized_date(value: &str) -> Result<String, BackendError> {
    Ok(parse_calendar_date("date", value)?.to_string())
}

fn normalized_time(value: &str) -> Result<String, BackendError> {
    Ok(parse_time_of_day("time", value)?.format("%H:%M").to_string())
}

pub async fn list_reminders(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Reminder>>>, BackendError> {
    let pool = app_state.pool()?;
    let reminders = db::list_reminders(pool, user.user_id).await?;
    tracing::debug!("Found {} reminders for user {}", reminders.len(), user.user_id);
    Ok(Json(ApiResponse::list(reminders)))
}

pub async fn reschedule_reminder(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<RescheduleReminderRequest>,
) -> Result<Json<ApiResponse<Reminder>>, BackendError> {
    let pool = app_state.pool()?;

    let (Some(reminder_id), Some(date), Some(time)) = (request.reminder_id, request.date, request.time) else {
        return Err(BackendError::bad_request("Missing reminderId, date, or time"));
    };

    let id = parse_id(&reminder_id, "Reminder")?;
    let date = normalized_date(&date)?;
    let time = normalized_time(&time)?;

    let reminder = db::reschedule_reminder(pool, user.user_id, id, &date, &time)
        .await?
        .ok_or_else(|| BackendError::not_found("Reminder"))?;

    tracing::info!("User {} moved reminder {} to {} {}", user.user_id, id, date, time);
    Ok(Json(ApiResponse::with_message("Reminder updated successfully", reminder)))
}

pub async fn create_reminder(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateReminderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Reminder>>), BackendError> {
    let pool = app_state.pool()?;
    let habit_id = parse_id(&request.habit_id, "Habit")?;

    let habit = habits::db::get_habit(pool, user.user_id, habit_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Habit"))?;

    let new_reminder = NewReminder {
        habit_id,
        habit: Some(habit.name),
        date: request.date.as_deref().map(normalized_date).transpose()?,
        time: request.time.as_deref().map(normalized_time).transpose()?,
        time_of_day: request.time_of_day,
        channel: request.channel,
        tone: request.tone,
        is_enabled: request.is_enabled.unwrap_or(true),
    };

    let reminder = db::insert_reminder(pool, user.user_id, &new_reminder).await?;
    tracing::info!("User {} added reminder {} for habit {}", user.user_id, reminder.reminder_id, habit_id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Reminder created successfully", reminder)),
    ))
}

pub async fn delete_reminder(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let pool = app_state.pool()?;
    let id = parse_id(&id, "Reminder")?;

    if !db::delete_reminder(pool, user.user_id, id).await? {
        return Err(BackendError::not_found("Reminder"));
    }
    Ok(Json(ApiResponse::with_message("Reminder deleted successfully", ())))
}
