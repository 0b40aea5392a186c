/**
 * User Model and Database Operations
 *
 * This module handles user records. Emails are stored trimmed and
 * lower-cased; callers normalize with [`normalize_email`] before lookups.
 */

use chrono::{DateTime, Utc};
use sqlx::{Executor, Sqlite};
use uuid::Uuid;

use crate::shared::PlanType;

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// User email address (lower-cased)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Unlimited habits regardless of subscription
    pub is_pro: bool,
    /// Plan last chosen through the profile or subscription endpoints
    pub subscription_plan: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The stored plan, if it names a known plan
    pub fn plan(&self) -> Option<PlanType> {
        self.subscription_plan
            .as_deref()
            .and_then(|plan| plan.parse().ok())
    }
}

const USER_COLUMNS: &str =
    "id, name, email, password_hash, is_pro, subscription_plan, created_at, updated_at";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Create a new user
///
/// `email` must already be normalized. A duplicate email surfaces as a
/// unique violation from the database.
pub async fn create_user<'e, E>(
    executor: E,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, name, email, password_hash, is_pro, subscription_plan, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, NULL, ?, ?)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

/// Get user by email
pub async fn get_user_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(executor)
        .await
}

/// Get user by ID
pub async fn get_user_by_id<'e, E>(executor: E, id: Uuid) -> Result<Option<User>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Replace a user's password hash
pub async fn update_password_hash<'e, E>(
    executor: E,
    id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}

/// Record the user's plan; `is_pro` follows the plan.
pub async fn set_plan<'e, E>(executor: E, id: Uuid, plan: PlanType) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        "UPDATE users SET subscription_plan = ?, is_pro = ?, updated_at = ? WHERE id = ?",
    )
    .bind(plan.as_str())
    .bind(plan == PlanType::Pro)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;
    Ok(())
}

/// Set the pro flag directly
pub async fn set_pro<'e, E>(executor: E, id: Uuid, is_pro: bool) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE users SET is_pro = ?, updated_at = ? WHERE id = ?")
        .bind(is_pro)
        .bind(Utc::now())
        .bind(id)
        .execute(executor)
        .await?;
    Ok(())
}
