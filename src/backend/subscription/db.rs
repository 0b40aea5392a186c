/**
 * Subscription Records
 *
 * A user may have many subscriptions over time. Starting a new one
 * deactivates the previous active subscription and records the plan on the
 * user row, so at most one subscription per user is active through this API.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{Executor, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::backend::auth::users;
use crate::shared::PlanType;

/// Subscription struct representing a row of `subscriptions`
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "subscriptionId")]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(try_from = "String")]
    pub plan_type: PlanType,
    pub is_active: bool,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

const SUBSCRIPTION_COLUMNS: &str = "id, user_id, plan_type, is_active, start_date, end_date";

/// Plan of the user's most recent active subscription
///
/// A subscription whose `end_date` has passed no longer counts, even while
/// its row is still marked active.
pub async fn latest_active_plan<'e, E>(executor: E, user_id: Uuid) -> Result<Option<PlanType>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(String, Option<DateTime<Utc>>)> = sqlx::query_as(
        r#"
        SELECT plan_type, end_date FROM subscriptions
        WHERE user_id = ? AND is_active = 1
        ORDER BY start_date DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await?;

    let now = Utc::now();
    Ok(rows
        .into_iter()
        .find(|(_, end_date)| end_date.map_or(true, |end| end > now))
        .and_then(|(plan, _)| plan.parse().ok()))
}

/// All of a user's subscriptions, newest first
pub async fn list_subscriptions<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<Subscription>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Subscription>(&format!(
        "SELECT {SUBSCRIPTION_COLUMNS} FROM subscriptions WHERE user_id = ? ORDER BY start_date DESC"
    ))
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Switch a user to `plan`
///
/// Deactivates the current subscription, inserts the new active one and
/// updates the user's plan and pro flag. Run inside a transaction.
pub async fn start_subscription(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    plan: PlanType,
    end_date: Option<DateTime<Utc>>,
) -> Result<Subscription, sqlx::Error> {
    sqlx::query("UPDATE subscriptions SET is_active = 0 WHERE user_id = ? AND is_active = 1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    let subscription = sqlx::query_as::<_, Subscription>(&format!(
        r#"
        INSERT INTO subscriptions (id, user_id, plan_type, is_active, start_date, end_date)
        VALUES (?, ?, ?, 1, ?, ?)
        RETURNING {SUBSCRIPTION_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(plan.as_str())
    .bind(Utc::now())
    .bind(end_date)
    .fetch_one(&mut *conn)
    .await?;

    users::set_plan(&mut *conn, user_id, plan).await?;

    Ok(subscription)
}
