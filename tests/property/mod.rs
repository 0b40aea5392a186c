//! Property-based tests for the pure business rules

mod plan_proptest;
mod streak_proptest;
