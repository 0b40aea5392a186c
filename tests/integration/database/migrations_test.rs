//! Database migration tests
//!
//! Tests to ensure migrations run correctly and the schema enforces the
//! constraints the handlers rely on.

use crate::common::{create_test_pool, register_unique_user, TestApp};
use streakly::backend::server::config::run_migrations;

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = create_test_pool().await;
    let result = run_migrations(&pool).await;
    assert!(result.is_ok(), "Migrations should run twice without error");
}

#[tokio::test]
async fn test_tables_exist() {
    let pool = create_test_pool().await;

    for table in ["users", "auth_tokens", "subscriptions", "habits", "habit_logs", "reminders"] {
        let result = sqlx::query(&format!("SELECT 1 FROM {table} LIMIT 1"))
            .execute(&pool)
            .await;
        assert!(result.is_ok(), "{table} table should exist");
    }
}

#[tokio::test]
async fn test_unknown_plan_type_rejected() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let result = sqlx::query(
        "INSERT INTO subscriptions (id, user_id, plan_type, is_active, start_date) VALUES (?, ?, 'gold', 1, '2025-01-01T00:00:00Z')",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(user.id)
    .execute(&app.pool)
    .await;

    assert!(result.is_err());
}
