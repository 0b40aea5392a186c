/**
 * Authentication Middleware
 *
 * This module protects routes that require a signed-in user. It reads the
 * bearer token from the Authorization header, checks it against the token
 * table and provides the user to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::sessions::{delete_token, find_token};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Authenticated user data resolved from a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub is_pro: bool,
    /// The token presented with this request
    pub token: String,
}

/// Authentication middleware
///
/// 1. Extracts the bearer token from the Authorization header
/// 2. Looks the token up; expired tokens are deleted and rejected
/// 3. Loads the owning user
/// 4. Attaches `AuthenticatedUser` to the request extensions
///
/// Returns 401 if any step fails.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(&request)?.to_string();
    let pool = app_state.pool()?;

    let user = authenticate(pool, &token).await?;
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn bearer_token(request: &Request) -> Result<&str, BackendError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| BackendError::unauthorized("Authentication required"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| BackendError::unauthorized("Authentication required"))
}

/// Resolve a bearer token to its user
pub async fn authenticate(pool: &SqlitePool, token: &str) -> Result<AuthenticatedUser, BackendError> {
    let auth_token = find_token(pool, token)
        .await?
        .ok_or_else(|| BackendError::unauthorized("Invalid token"))?;

    if auth_token.is_expired_at(Utc::now()) {
        tracing::info!("Removing expired token for user {}", auth_token.user_id);
        delete_token(pool, token).await?;
        return Err(BackendError::unauthorized("Token expired"));
    }

    let user = get_user_by_id(pool, auth_token.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token refers to missing user {}", auth_token.user_id);
            BackendError::unauthorized("User not found")
        })?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        name: user.name,
        email: user.email,
        is_pro: user.is_pro,
        token: token.to_string(),
    })
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Authentication required")
            })?;

        Ok(AuthUser(user))
    }
}
