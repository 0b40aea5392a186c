/**
 * Subscription Handlers
 *
 * - `GET /api/subscriptions` - the user's subscriptions, newest first
 * - `POST /api/subscriptions` - switch to a plan
 * - `GET /api/subscriptions/limits` - current quota and usage
 */

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::backend::server::config::begin_write;
use crate::backend::server::state::AppState;
use crate::backend::subscription::db::{self, Subscription};
use crate::backend::subscription::limits::{load_quota, LimitsResponse};
use crate::shared::{ApiResponse, PlanType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub plan_type: PlanType,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

pub async fn list_subscriptions(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<Vec<Subscription>>>, BackendError> {
    let pool = app_state.pool()?;
    let subscriptions = db::list_subscriptions(pool, user.user_id).await?;
    Ok(Json(ApiResponse::list(subscriptions)))
}

/// Start a subscription on the requested plan
///
/// Lowering the plan never deletes or deactivates existing habits; the
/// lower quota applies to later creations.
pub async fn create_subscription(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Subscription>>), BackendError> {
    let pool = app_state.pool()?;

    if let Some(end_date) = request.end_date {
        if end_date <= Utc::now() {
            return Err(BackendError::bad_request("endDate must be in the future"));
        }
    }

    let mut tx = begin_write(pool).await?;
    let subscription =
        db::start_subscription(&mut tx, user.user_id, request.plan_type, request.end_date).await?;
    tx.commit().await?;

    tracing::info!(
        "User {} subscribed to the {} plan",
        user.user_id,
        subscription.plan_type
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Subscription created successfully",
            subscription,
        )),
    ))
}

pub async fn get_limits(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<LimitsResponse>>, BackendError> {
    let pool = app_state.pool()?;
    let mut conn = pool.acquire().await?;
    let quota = load_quota(&mut conn, user.user_id).await?;
    Ok(Json(ApiResponse::ok(quota.into())))
}
