/**
 * Register Handler
 *
 * This module implements user registration for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate name, email and password
 * 2. Hash the password with bcrypt
 * 3. Create the user (the email column is unique)
 * 4. Issue a bearer token
 * 5. Return token and user info with 201
 *
 * # Validation
 *
 * - All fields are required
 * - Email must contain '@'
 * - Password must be at least 6 characters long
 * - Email must not be registered yet (case-insensitive)
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest, MIN_PASSWORD_LEN};
use crate::backend::auth::sessions::{hash_password, issue_token};
use crate::backend::auth::users::{create_user, get_user_by_email, normalize_email};
use crate::backend::error::{is_unique_violation, BackendError};
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;

const DUPLICATE_EMAIL_MESSAGE: &str = "User with this email already exists";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing fields, bad email, short password or duplicate email
/// * `503 Service Unavailable` - database not available
/// * `500 Internal Server Error` - hashing or database failure
pub async fn register(
    State(app_state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let pool = app_state.pool()?;

    let name = request.name.trim().to_string();
    let email = normalize_email(&request.email);

    if name.is_empty() || email.is_empty() || request.password.is_empty() {
        tracing::warn!("Registration with missing fields");
        return Err(BackendError::bad_request("All fields are required"));
    }

    if !email.contains('@') {
        tracing::warn!("Invalid email format: {}", email);
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if request.password.len() < MIN_PASSWORD_LEN {
        tracing::warn!("Password too short");
        return Err(BackendError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    if get_user_by_email(pool, &email).await?.is_some() {
        tracing::warn!("Email already exists: {}", email);
        return Err(BackendError::bad_request(DUPLICATE_EMAIL_MESSAGE));
    }

    let password_hash = hash_password(request.password, app_state.config.bcrypt_cost).await?;

    let user = create_user(pool, &name, &email, &password_hash)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BackendError::bad_request(DUPLICATE_EMAIL_MESSAGE)
            } else {
                e.into()
            }
        })?;

    let token = issue_token(pool, user.id, app_state.config.token_ttl_days).await?;

    tracing::info!("User registered: {} ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            message: "User registered successfully".to_string(),
            token: token.token_value,
            user: user.into(),
        }),
    ))
}
