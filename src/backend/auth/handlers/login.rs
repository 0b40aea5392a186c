/**
 * Login Handler
 *
 * This module implements user authentication for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by (normalized) email
 * 2. Verify password using bcrypt
 * 3. Issue a new bearer token; earlier tokens stay valid
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown email and wrong password give the same 401 response
 * - Passwords are never logged or returned
 */

use axum::{extract::State, Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::{issue_token, verify_password};
use crate::backend::auth::users::{get_user_by_email, normalize_email};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password missing
/// * `401 Unauthorized` - unknown email or wrong password
/// * `503 Service Unavailable` - database not available
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = app_state.pool()?;
    let email = normalize_email(&request.email);

    if email.is_empty() || request.password.is_empty() {
        return Err(BackendError::bad_request("Email and password are required"));
    }

    tracing::info!("Login request for email: {}", email);

    let user = match get_user_by_email(pool, &email).await? {
        Some(user) => user,
        None => {
            tracing::warn!("Login for unknown email: {}", email);
            return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
        }
    };

    if !verify_password(request.password, user.password_hash.clone()).await? {
        tracing::warn!("Wrong password for user {}", user.id);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = issue_token(pool, user.id, app_state.config.token_ttl_days).await?;

    tracing::info!("User logged in: {} ({})", user.id, user.email);

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_string(),
        token: token.token_value,
        user: user.into(),
    }))
}
