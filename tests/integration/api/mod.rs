//! API integration tests
//!
//! Integration tests for all API endpoints

mod habit_log_test;
mod habit_test;
mod reminder_test;
mod report_test;
mod subscription_test;
