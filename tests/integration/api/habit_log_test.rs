//! Habit log API integration tests
//!
//! Completion logging, the one-log-per-day guard and streak updates.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_habit, id_of, register_unique_user, TestApp, TestUser};

async fn log_completion(app: &TestApp, user: &TestUser, habit_id: &str, date: &str) -> axum_test::TestResponse {
    app.server
        .post("/api/habitLogs")
        .authorization_bearer(&user.token)
        .json(&json!({ "habitId": habit_id, "completedDate": date }))
        .await
}

async fn fetch_habit(app: &TestApp, user: &TestUser, habit_id: &str) -> Value {
    app.server
        .get(&format!("/api/habits/{}", habit_id))
        .authorization_bearer(&user.token)
        .await
        .json::<Value>()["data"]
        .clone()
}

#[tokio::test]
async fn test_create_log() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Read" })).await);

    let response = app
        .server
        .post("/api/habitLogs")
        .authorization_bearer(&user.token)
        .json(&json!({
            "habitId": habit_id,
            "completedDate": "2025-03-01",
            "duration": 20,
            "mood": "good",
            "energyLevel": 7
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let log = &body["data"];
    assert_eq!(log["habitId"], habit_id);
    assert_eq!(log["completedDate"], "2025-03-01");
    assert_eq!(log["isCompleted"], true);
    assert_eq!(log["duration"], 20);
    assert_eq!(log["energyLevel"], 7);
}

#[tokio::test]
async fn test_duplicate_completion_rejected() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Read" })).await);

    let first = log_completion(&app, &user, &habit_id, "2025-03-01").await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = log_completion(&app, &user, &habit_id, "2025-03-01").await;
    assert_api_error!(second, StatusCode::BAD_REQUEST, "already been completed");

    let logs: Value = app
        .server
        .get(&format!("/api/habitLogs/habit/{}", habit_id))
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(logs["count"], 1);

    let habit = fetch_habit(&app, &user, &habit_id).await;
    assert_eq!(habit["currentStreak"], 1);
}

#[tokio::test]
async fn test_streak_grows_on_consecutive_days_and_resets_after_gap() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Read" })).await);

    for date in ["2025-03-01", "2025-03-02", "2025-03-03"] {
        log_completion(&app, &user, &habit_id, date).await;
    }
    let habit = fetch_habit(&app, &user, &habit_id).await;
    assert_eq!(habit["currentStreak"], 3);
    assert_eq!(habit["bestStreak"], 3);
    assert_eq!(habit["lastCompletedDate"], "2025-03-03");

    log_completion(&app, &user, &habit_id, "2025-03-06").await;
    let habit = fetch_habit(&app, &user, &habit_id).await;
    assert_eq!(habit["currentStreak"], 1);
    assert_eq!(habit["bestStreak"], 3);
}

#[tokio::test]
async fn test_backdated_completion_keeps_streak() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Read" })).await);

    log_completion(&app, &user, &habit_id, "2025-03-10").await;
    let response = log_completion(&app, &user, &habit_id, "2025-03-01").await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let habit = fetch_habit(&app, &user, &habit_id).await;
    assert_eq!(habit["currentStreak"], 1);
    assert_eq!(habit["lastCompletedDate"], "2025-03-10");
}

#[tokio::test]
async fn test_log_for_foreign_habit_is_not_found() {
    let app = TestApp::new().await;
    let owner = register_unique_user(&app.server).await;
    let intruder = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &owner, json!({ "name": "Read" })).await);

    let response = log_completion(&app, &intruder, &habit_id, "2025-03-01").await;
    assert_api_error!(response, StatusCode::NOT_FOUND, "Habit not found");

    let response = app
        .server
        .get(&format!("/api/habitLogs/habit/{}", habit_id))
        .authorization_bearer(&intruder.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_completed_date_rejected() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Read" })).await);

    let response = log_completion(&app, &user, &habit_id, "yesterday").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_and_delete_log() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Read" })).await);
    let created = log_completion(&app, &user, &habit_id, "2025-03-01").await;
    let log_id = id_of(&created.json::<Value>()["data"]);
    let path = format!("/api/habitLogs/{}", log_id);

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({ "notes": "Finished the chapter", "duration": 45 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let updated = &body["data"];
    assert_eq!(updated["notes"], "Finished the chapter");
    assert_eq!(updated["duration"], 45);
    assert_eq!(updated["completedDate"], "2025-03-01");

    let response = app.server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.server.get(&path).authorization_bearer(&user.token).await;
    assert_api_error!(response, StatusCode::NOT_FOUND, "Habit log not found");
}
