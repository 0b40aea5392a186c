//! Habit API integration tests
//!
//! CRUD, per-user scoping, next reminder and the active-habit quota.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_habit, id_of, register_unique_user, TestApp};

#[tokio::test]
async fn test_create_habit_defaults() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let habit = create_habit(&app.server, &user, json!({ "name": "  Read  " })).await;

    assert_eq!(habit["name"], "Read");
    assert_eq!(habit["userId"], user.id.to_string());
    assert_eq!(habit["frequency"], "daily");
    assert_eq!(habit["isActive"], true);
    assert_eq!(habit["currentStreak"], 0);
    assert_eq!(habit["bestStreak"], 0);
}

#[tokio::test]
async fn test_create_habit_requires_name() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .post("/api/habits")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "   " }))
        .await;

    assert_api_error!(response, StatusCode::BAD_REQUEST, "name");
}

#[tokio::test]
async fn test_create_habit_rejects_bad_reminder_time() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .post("/api/habits")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "Run", "reminderTime": "25:99" }))
        .await;

    assert_api_error!(response, StatusCode::BAD_REQUEST, "reminderTime");
}

#[tokio::test]
async fn test_list_and_get_habits() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let first = create_habit(&app.server, &user, json!({ "name": "Read" })).await;
    create_habit(&app.server, &user, json!({ "name": "Run" })).await;

    let list: Value = app
        .server
        .get("/api/habits")
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(list["count"], 2);

    let response = app
        .server
        .get(&format!("/api/habits/{}", id_of(&first)))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["data"]["name"], "Read");
}

#[tokio::test]
async fn test_habits_are_scoped_to_owner() {
    let app = TestApp::new().await;
    let owner = register_unique_user(&app.server).await;
    let intruder = register_unique_user(&app.server).await;
    let habit = create_habit(&app.server, &owner, json!({ "name": "Read" })).await;
    let path = format!("/api/habits/{}", id_of(&habit));

    let get = app.server.get(&path).authorization_bearer(&intruder.token).await;
    assert_api_error!(get, StatusCode::NOT_FOUND, "Habit not found");

    let update = app
        .server
        .put(&path)
        .authorization_bearer(&intruder.token)
        .json(&json!({ "name": "Mine now" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = app.server.delete(&path).authorization_bearer(&intruder.token).await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);

    let list: Value = app
        .server
        .get("/api/habits")
        .authorization_bearer(&intruder.token)
        .await
        .json();
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .get("/api/habits/not-a-uuid")
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_habit_partial() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit = create_habit(
        &app.server,
        &user,
        json!({ "name": "Read", "description": "Ten pages" }),
    )
    .await;

    let response = app
        .server
        .put(&format!("/api/habits/{}", id_of(&habit)))
        .authorization_bearer(&user.token)
        .json(&json!({ "frequency": "weekly", "daysOfWeek": ["mon", "thu"] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let updated = &body["data"];
    assert_eq!(updated["name"], "Read");
    assert_eq!(updated["description"], "Ten pages");
    assert_eq!(updated["frequency"], "weekly");
    assert_eq!(updated["daysOfWeek"], json!(["mon", "thu"]));
}

#[tokio::test]
async fn test_delete_habit_removes_logs_and_reminders() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit = create_habit(&app.server, &user, json!({ "name": "Read" })).await;
    let habit_id = id_of(&habit);

    app.server
        .post("/api/habitLogs")
        .authorization_bearer(&user.token)
        .json(&json!({ "habitId": habit_id }))
        .await;
    app.server
        .post("/api/reminders")
        .authorization_bearer(&user.token)
        .json(&json!({ "habitId": habit_id, "date": "2030-01-01", "time": "08:00" }))
        .await;

    let response = app
        .server
        .delete(&format!("/api/habits/{}", habit_id))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let logs: Value = app
        .server
        .get("/api/habitLogs")
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(logs["count"], 0);

    let reminders: Value = app
        .server
        .get("/api/reminders/all")
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(reminders["count"], 0);

    let again = app
        .server
        .delete(&format!("/api/habits/{}", habit_id))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(again.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_next_reminder() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let daily = create_habit(
        &app.server,
        &user,
        json!({ "name": "Stretch", "reminderTime": "07:30", "reminderFrequency": "daily" }),
    )
    .await;
    let unscheduled = create_habit(&app.server, &user, json!({ "name": "Read" })).await;

    let body: Value = app
        .server
        .get(&format!("/api/habits/{}/next-reminder", id_of(&daily)))
        .authorization_bearer(&user.token)
        .await
        .json();
    let next = body["data"]["nextReminder"].as_str().unwrap();
    assert!(next.ends_with("07:30:00"), "unexpected next reminder {next}");

    let body: Value = app
        .server
        .get(&format!("/api/habits/{}/next-reminder", id_of(&unscheduled)))
        .authorization_bearer(&user.token)
        .await
        .json();
    assert!(body["data"]["nextReminder"].is_null());
}

#[tokio::test]
async fn test_basic_plan_allows_three_active_habits() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    for i in 0..3 {
        create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await;
    }

    let response = app
        .server
        .post("/api/habits")
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "One too many" }))
        .await;

    assert_api_error!(response, StatusCode::FORBIDDEN, "Habit limit reached");
}

#[tokio::test]
async fn test_inactive_habits_do_not_count() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    for i in 0..3 {
        create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await;
    }
    let paused = create_habit(
        &app.server,
        &user,
        json!({ "name": "Paused", "isActive": false }),
    )
    .await;
    assert_eq!(paused["isActive"], false);

    // Reactivating would exceed the quota
    let response = app
        .server
        .put(&format!("/api/habits/{}", id_of(&paused)))
        .authorization_bearer(&user.token)
        .json(&json!({ "isActive": true }))
        .await;
    assert_api_error!(response, StatusCode::FORBIDDEN, "Habit limit reached");
}

#[tokio::test]
async fn test_deactivating_frees_a_slot() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let mut habits = Vec::new();
    for i in 0..3 {
        habits.push(create_habit(&app.server, &user, json!({ "name": format!("Habit {i}") })).await);
    }

    let response = app
        .server
        .put(&format!("/api/habits/{}", id_of(&habits[0])))
        .authorization_bearer(&user.token)
        .json(&json!({ "isActive": false }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    create_habit(&app.server, &user, json!({ "name": "Fresh start" })).await;
}
