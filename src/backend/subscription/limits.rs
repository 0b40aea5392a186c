/**
 * Habit Quota Enforcement
 *
 * Reads the inputs of the habit limit policy (pro flag, latest active plan)
 * and the user's active habit count, and rejects an activation that would
 * exceed the quota. Callers run [`ensure_can_activate`] and the write it
 * guards on the same transaction.
 */

use serde::Serialize;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::habits::db::count_active_habits;
use crate::backend::subscription::db::latest_active_plan;
use crate::shared::plan::{habit_limit, limit_reached_message, HabitLimit, PlanType};

/// A user's quota and current usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitQuota {
    /// Effective plan: `pro` for pro users, else the active plan or `basic`
    pub plan: PlanType,
    pub is_pro: bool,
    pub limit: HabitLimit,
    pub active_habits: i64,
}

impl HabitQuota {
    pub fn allows_another(&self) -> bool {
        self.limit.allows_another(self.active_habits)
    }
}

/// Wire form of [`HabitQuota`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsResponse {
    pub plan_type: PlanType,
    pub is_pro: bool,
    pub limit: i64,
    pub active_habits: i64,
    pub remaining: i64,
}

impl From<HabitQuota> for LimitsResponse {
    fn from(quota: HabitQuota) -> Self {
        Self {
            plan_type: quota.plan,
            is_pro: quota.is_pro,
            limit: quota.limit.as_i64(),
            active_habits: quota.active_habits,
            remaining: quota.limit.remaining(quota.active_habits),
        }
    }
}

pub async fn load_quota(conn: &mut SqliteConnection, user_id: Uuid) -> Result<HabitQuota, BackendError> {
    let user = get_user_by_id(&mut *conn, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User not found"))?;

    let active_plan = if user.is_pro {
        None
    } else {
        latest_active_plan(&mut *conn, user_id).await?
    };

    let limit = habit_limit(user.is_pro, active_plan);
    let plan = if user.is_pro {
        PlanType::Pro
    } else {
        active_plan.unwrap_or_default()
    };
    let active_habits = count_active_habits(&mut *conn, user_id).await?;

    Ok(HabitQuota {
        plan,
        is_pro: user.is_pro,
        limit,
        active_habits,
    })
}

/// Reject with 403 if the user cannot hold one more active habit
pub async fn ensure_can_activate(conn: &mut SqliteConnection, user_id: Uuid) -> Result<HabitQuota, BackendError> {
    let quota = load_quota(conn, user_id).await?;

    match quota.limit {
        HabitLimit::Limited(max) if !quota.allows_another() => {
            tracing::warn!(
                "User {} reached the {} plan habit limit ({} of {})",
                user_id,
                quota.plan,
                quota.active_habits,
                max
            );
            Err(BackendError::HabitLimitReached {
                message: limit_reached_message(quota.plan, max),
            })
        }
        _ => Ok(quota),
    }
}
