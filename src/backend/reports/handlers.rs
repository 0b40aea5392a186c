/**
 * Report Handler
 */

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::habit_logs;
use crate::backend::habits;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::report::{summarize, ReportRange, ReportSummary};
use crate::shared::ApiResponse;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub range: Option<String>,
}

/// Summarize the user's progress over the requested range (weekly by default)
pub async fn get_report(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<ReportSummary>>, BackendError> {
    let pool = app_state.pool()?;
    let range = match query.range.as_deref() {
        Some(raw) => raw.parse::<ReportRange>()?,
        None => ReportRange::default(),
    };

    let habits = habits::db::list_habits(pool, user.user_id).await?;
    let logs = habit_logs::db::list_logs(pool, user.user_id).await?;
    let summary = summarize(&habits, &logs, range, Utc::now().date_naive());

    tracing::debug!(
        "Report for user {} ({}): {}% completion",
        user.user_id,
        range.as_str(),
        summary.completion_rate
    );

    Ok(Json(ApiResponse::ok(summary)))
}
