//! Property-based tests for the habit limit policy

use proptest::prelude::*;
use streakly::shared::plan::{BASIC_HABIT_LIMIT, PREMIUM_HABIT_LIMIT};
use streakly::shared::{habit_limit, HabitLimit, PlanType};

fn any_plan() -> impl Strategy<Value = Option<PlanType>> {
    prop_oneof![
        Just(None),
        Just(Some(PlanType::Basic)),
        Just(Some(PlanType::Premium)),
        Just(Some(PlanType::Pro)),
    ]
}

proptest! {
    #[test]
    fn test_pro_flag_always_unlimited(plan in any_plan(), active in 0i64..10_000) {
        let limit = habit_limit(true, plan);
        prop_assert_eq!(limit, HabitLimit::Unlimited);
        prop_assert!(limit.allows_another(active));
        prop_assert_eq!(limit.remaining(active), -1);
    }

    #[test]
    fn test_allows_another_matches_remaining(plan in any_plan(), active in 0i64..50) {
        let limit = habit_limit(false, plan);
        match limit {
            HabitLimit::Limited(_) => {
                prop_assert_eq!(limit.allows_another(active), limit.remaining(active) > 0);
            }
            HabitLimit::Unlimited => {
                prop_assert_eq!(plan, Some(PlanType::Pro));
            }
        }
    }

    #[test]
    fn test_remaining_never_negative_when_limited(active in 0i64..100) {
        for plan in [None, Some(PlanType::Basic), Some(PlanType::Premium)] {
            prop_assert!(habit_limit(false, plan).remaining(active) >= 0);
        }
    }
}

#[test]
fn test_plan_quotas() {
    assert_eq!(habit_limit(false, None), HabitLimit::Limited(BASIC_HABIT_LIMIT));
    assert_eq!(habit_limit(false, Some(PlanType::Basic)), HabitLimit::Limited(3));
    assert_eq!(habit_limit(false, Some(PlanType::Premium)), HabitLimit::Limited(PREMIUM_HABIT_LIMIT));
    assert_eq!(habit_limit(false, Some(PlanType::Premium)).as_i64(), 10);
    assert_eq!(habit_limit(false, Some(PlanType::Pro)), HabitLimit::Unlimited);
}
