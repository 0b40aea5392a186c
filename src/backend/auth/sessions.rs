/**
 * Session Management and Auth Tokens
 *
 * Bearer tokens are opaque UUID strings stored in `auth_tokens` with an
 * expiry timestamp. A token is valid while it exists and has not expired;
 * expired tokens are deleted when presented and by a periodic purge.
 *
 * Passwords are hashed with bcrypt at the configured cost.
 */

use chrono::{DateTime, Duration, Utc};
use sqlx::{Executor, Sqlite};
use uuid::Uuid;

use crate::backend::error::BackendError;

/// Stored bearer token
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_value: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Issue a new token for a user, valid for `ttl_days`
pub async fn issue_token<'e, E>(
    executor: E,
    user_id: Uuid,
    ttl_days: i64,
) -> Result<AuthToken, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    sqlx::query_as::<_, AuthToken>(
        r#"
        INSERT INTO auth_tokens (id, user_id, token_value, expires_at, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, user_id, token_value, expires_at, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(Uuid::new_v4().to_string())
    .bind(now + Duration::days(ttl_days))
    .bind(now)
    .fetch_one(executor)
    .await
}

/// Look up a token by its value
pub async fn find_token<'e, E>(executor: E, token_value: &str) -> Result<Option<AuthToken>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, AuthToken>(
        "SELECT id, user_id, token_value, expires_at, created_at FROM auth_tokens WHERE token_value = ?",
    )
    .bind(token_value)
    .fetch_optional(executor)
    .await
}

/// Delete a token by its value, returning whether it existed
pub async fn delete_token<'e, E>(executor: E, token_value: &str) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM auth_tokens WHERE token_value = ?")
        .bind(token_value)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete every token past its expiry, returning how many were removed
pub async fn delete_expired_tokens<'e, E>(executor: E) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at < ?")
        .bind(Utc::now())
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}

/// Hash a password with bcrypt
///
/// Hashing is CPU-bound, so it runs on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, BackendError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("password hashing task failed: {}", e)))?
        .map_err(|e| BackendError::internal(format!("failed to hash password: {}", e)))
}

/// Verify a password against a stored bcrypt hash
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, BackendError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| BackendError::internal(format!("password verification task failed: {}", e)))?;

    match verified {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {:?}", e);
            Ok(false)
        }
    }
}
