//! Property-based tests for streak counting

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use streakly::shared::{apply_completion, StreakState};

fn base_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

proptest! {
    #[test]
    fn test_best_never_below_current(offsets in prop::collection::vec(0i64..60, 1..40)) {
        let mut state = StreakState::default();
        for offset in offsets {
            state = apply_completion(state, base_day() + Duration::days(offset));
            prop_assert!(state.best_streak >= state.current_streak);
            prop_assert!(state.current_streak >= 1);
        }
    }

    #[test]
    fn test_best_streak_is_monotonic(offsets in prop::collection::vec(0i64..60, 1..40)) {
        let mut state = StreakState::default();
        for offset in offsets {
            let next = apply_completion(state, base_day() + Duration::days(offset));
            prop_assert!(next.best_streak >= state.best_streak);
            state = next;
        }
    }

    #[test]
    fn test_consecutive_run_counts_every_day(days in 1u32..100) {
        let mut state = StreakState::default();
        for offset in 0..days {
            state = apply_completion(state, base_day() + Duration::days(i64::from(offset)));
        }
        prop_assert_eq!(state.current_streak, days);
        prop_assert_eq!(state.best_streak, days);
    }

    #[test]
    fn test_backdated_completion_is_ignored(
        current in 1u32..50,
        best_extra in 0u32..50,
        back in 1i64..30,
    ) {
        let last = base_day() + Duration::days(60);
        let state = StreakState::new(current, current + best_extra, Some(last));
        prop_assert_eq!(apply_completion(state, last - Duration::days(back)), state);
    }

    #[test]
    fn test_same_day_completion_is_idempotent(offset in 0i64..365) {
        let day = base_day() + Duration::days(offset);
        let once = apply_completion(StreakState::default(), day);
        prop_assert_eq!(apply_completion(once, day), once);
    }
}
