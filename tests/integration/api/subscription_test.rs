//! Subscription API integration tests
//!
//! Plan changes and the habit quota each plan grants.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use streakly::backend::auth::users::set_pro;
use uuid::Uuid;

use crate::common::{create_habit, register_unique_user, subscribe, TestApp, TestUser};

async fn limits(app: &TestApp, user: &TestUser) -> Value {
    let body: Value = app
        .server
        .get("/api/subscriptions/limits")
        .authorization_bearer(&user.token)
        .await
        .json();
    body["data"].clone()
}

async fn try_create_habit(app: &TestApp, user: &TestUser, name: &str) -> axum_test::TestResponse {
    app.server
        .post("/api/habits")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": name }))
        .await
}

#[tokio::test]
async fn test_new_user_is_on_basic() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let limits = limits(&app, &user).await;

    assert_eq!(limits["planType"], "basic");
    assert_eq!(limits["isPro"], false);
    assert_eq!(limits["limit"], 3);
    assert_eq!(limits["activeHabits"], 0);
    assert_eq!(limits["remaining"], 3);
}

#[tokio::test]
async fn test_premium_allows_ten_habits() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    subscribe(&app.server, &user, "premium").await;

    for i in 0..10 {
        create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await;
    }

    let response = try_create_habit(&app, &user, "Eleventh").await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "10 habits");

    let limits = limits(&app, &user).await;
    assert_eq!(limits["planType"], "premium");
    assert_eq!(limits["activeHabits"], 10);
    assert_eq!(limits["remaining"], 0);
}

#[tokio::test]
async fn test_pro_plan_is_unlimited() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    subscribe(&app.server, &user, "pro").await;

    for i in 0..12 {
        create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await;
    }

    let limits = limits(&app, &user).await;
    assert_eq!(limits["isPro"], true);
    assert_eq!(limits["limit"], -1);
    assert_eq!(limits["remaining"], -1);
}

#[tokio::test]
async fn test_pro_flag_without_subscription_is_unlimited() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    set_pro(&app.pool, user.id, true).await.unwrap();

    for i in 0..5 {
        create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await;
    }

    let limits = limits(&app, &user).await;
    assert_eq!(limits["planType"], "pro");
    assert_eq!(limits["limit"], -1);
}

#[tokio::test]
async fn test_inactive_subscription_falls_back_to_basic() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    sqlx::query(
        "INSERT INTO subscriptions (id, user_id, plan_type, is_active, start_date) VALUES (?, ?, 'premium', 0, ?)",
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(Utc::now())
    .execute(&app.pool)
    .await
    .unwrap();

    for i in 0..3 {
        create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await;
    }
    let response = try_create_habit(&app, &user, "Fourth").await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "3 habits");
}

#[tokio::test]
async fn test_downgrade_keeps_existing_habits() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    subscribe(&app.server, &user, "premium").await;

    for i in 0..5 {
        create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await;
    }
    subscribe(&app.server, &user, "basic").await;

    let limits = limits(&app, &user).await;
    assert_eq!(limits["planType"], "basic");
    assert_eq!(limits["activeHabits"], 5);
    assert_eq!(limits["remaining"], 0);

    let response = try_create_habit(&app, &user, "Sixth").await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_subscription_history() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    subscribe(&app.server, &user, "premium").await;
    subscribe(&app.server, &user, "pro").await;

    let body: Value = app
        .server
        .get("/api/subscriptions")
        .authorization_bearer(&user.token)
        .await
        .json();

    assert_eq!(body["count"], 2);
    let active: Vec<&Value> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["isActive"] == true)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0]["planType"], "pro");
}

#[tokio::test]
async fn test_subscription_end_date_must_be_future() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .post("/api/subscriptions")
        .authorization_bearer(&user.token)
        .json(&json!({ "planType": "premium", "endDate": Utc::now() - Duration::days(1) }))
        .await;
    assert_api_error!(response, StatusCode::BAD_REQUEST, "endDate");

    let response = app
        .server
        .post("/api/subscriptions")
        .authorization_bearer(&user.token)
        .json(&json!({ "planType": "gold" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
