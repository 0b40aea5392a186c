//! Subscription plans and the habit limit policy.
//!
//! A user's quota of active habits is decided by two inputs only: the `isPro`
//! flag on the user record and the plan of their most recent active
//! subscription. The decision is pure; counting habits and rejecting the
//! insert is the caller's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Subscription plan tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Basic,
    Premium,
    Pro,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Premium => "premium",
            Self::Pro => "pro",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Self::Basic),
            "premium" => Ok(Self::Premium),
            "pro" => Ok(Self::Pro),
            other => Err(SharedError::unknown("plan type", other)),
        }
    }
}

impl TryFrom<String> for PlanType {
    type Error = SharedError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Maximum number of active habits a user may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitLimit {
    Limited(u32),
    Unlimited,
}

impl HabitLimit {
    /// Wire representation: the quota, or `-1` when unlimited.
    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Limited(n) => i64::from(*n),
            Self::Unlimited => -1,
        }
    }

    /// Whether a user already holding `active` habits may add one more.
    pub fn allows_another(&self, active: i64) -> bool {
        match self {
            Self::Limited(n) => active < i64::from(*n),
            Self::Unlimited => true,
        }
    }

    /// Habits left before the limit, `-1` when unlimited.
    pub fn remaining(&self, active: i64) -> i64 {
        match self {
            Self::Limited(n) => (i64::from(*n) - active).max(0),
            Self::Unlimited => -1,
        }
    }
}

pub const BASIC_HABIT_LIMIT: u32 = 3;
pub const PREMIUM_HABIT_LIMIT: u32 = 10;

/// Decide the habit quota for a user.
///
/// `active_plan` is the plan of the user's most recent subscription with
/// `isActive = true`, or `None` when there is no such subscription. The pro
/// flag wins over any subscription.
pub fn habit_limit(is_pro: bool, active_plan: Option<PlanType>) -> HabitLimit {
    if is_pro {
        return HabitLimit::Unlimited;
    }
    match active_plan.unwrap_or_default() {
        PlanType::Basic => HabitLimit::Limited(BASIC_HABIT_LIMIT),
        PlanType::Premium => HabitLimit::Limited(PREMIUM_HABIT_LIMIT),
        PlanType::Pro => HabitLimit::Unlimited,
    }
}

/// User-facing rejection text for a create that would exceed the quota.
pub fn limit_reached_message(plan: PlanType, limit: u32) -> String {
    format!(
        "Habit limit reached. Your {} plan allows up to {} habits. Upgrade your plan to add more.",
        plan, limit
    )
}
