/**
 * Profile Handlers
 *
 * - `GET /api/auth/profile` - the signed-in user
 * - `GET /api/auth/verify` - token check returning the user
 * - `PUT /api/auth/profile` - change password and/or subscription plan
 *
 * Changing the plan starts a new subscription (see
 * `subscription::db::start_subscription`), which also sets the pro flag
 * when the plan is `pro` and clears it otherwise.
 */

use axum::{extract::State, Json};

use crate::backend::auth::handlers::types::{
    ProfileResponse, UpdateProfileRequest, VerifyResponse, MIN_PASSWORD_LEN,
};
use crate::backend::auth::sessions::hash_password;
use crate::backend::auth::users::{get_user_by_id, update_password_hash};
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, AuthUser};
use crate::backend::server::config::begin_write;
use crate::backend::server::state::AppState;
use crate::backend::subscription::db::start_subscription;

pub async fn get_profile(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, BackendError> {
    let pool = app_state.pool()?;
    let user = get_user_by_id(pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User"))?;

    Ok(Json(ProfileResponse::new("Profile retrieved successfully", user.into())))
}

/// Token check for clients restoring a saved session
///
/// Reaching the handler means the middleware accepted the token.
pub async fn verify_token(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<VerifyResponse>, BackendError> {
    let pool = app_state.pool()?;
    let user = get_user_by_id(pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User not found"))?;

    Ok(Json(VerifyResponse {
        valid: true,
        user: user.into(),
    }))
}

pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, BackendError> {
    let pool = app_state.pool()?;

    let password_hash = match request.password {
        Some(password) if password.len() < MIN_PASSWORD_LEN => {
            return Err(BackendError::bad_request(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Some(password) => Some(hash_password(password, app_state.config.bcrypt_cost).await?),
        None => None,
    };

    let mut tx = begin_write(pool).await?;
    if let Some(hash) = &password_hash {
        update_password_hash(&mut *tx, user.user_id, hash).await?;
    }
    if let Some(plan) = request.subscription_plan {
        start_subscription(&mut tx, user.user_id, plan, None).await?;
        tracing::info!("User {} switched to the {} plan", user.user_id, plan);
    }
    let updated = get_user_by_id(&mut *tx, user.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("User"))?;
    tx.commit().await?;

    tracing::info!("Profile updated for user {}", user.user_id);

    Ok(Json(ProfileResponse::new(
        "Profile updated successfully",
        updated.into(),
    )))
}
