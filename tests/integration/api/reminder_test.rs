//! Reminder API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_habit, id_of, register_unique_user, TestApp, TestUser};

async fn create_reminder(app: &TestApp, user: &TestUser, habit_id: &str) -> Value {
    let response = app
        .server
        .post("/api/reminders")
        .authorization_bearer(&user.token)
        .json(&json!({ "habitId": habit_id, "date": "2030-01-01", "time": "08:05", "channel": "push" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

#[tokio::test]
async fn test_create_and_list_reminders() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Stretch" })).await);

    let reminder = create_reminder(&app, &user, &habit_id).await;
    assert_eq!(reminder["habit"], "Stretch");
    assert_eq!(reminder["time"], "08:05");
    assert_eq!(reminder["isEnabled"], true);

    let list: Value = app
        .server
        .get("/api/reminders/all")
        .authorization_bearer(&user.token)
        .await
        .json();
    assert_eq!(list["count"], 1);
    assert_eq!(list["data"][0]["reminderId"], reminder["reminderId"]);
}

#[tokio::test]
async fn test_reschedule_reminder() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Stretch" })).await);
    let reminder = create_reminder(&app, &user, &habit_id).await;

    let response = app
        .server
        .put("/api/reminders/update")
        .authorization_bearer(&user.token)
        .json(&json!({
            "reminderId": reminder["reminderId"],
            "date": "2030-02-15",
            "time": "19:45"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["date"], "2030-02-15");
    assert_eq!(body["data"]["time"], "19:45");
}

#[tokio::test]
async fn test_reschedule_requires_all_fields() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .put("/api/reminders/update")
        .authorization_bearer(&user.token)
        .json(&json!({ "date": "2030-02-15" }))
        .await;

    assert_api_error!(response, StatusCode::BAD_REQUEST, "Missing reminderId, date, or time");
}

#[tokio::test]
async fn test_reminders_are_scoped_to_owner() {
    let app = TestApp::new().await;
    let owner = register_unique_user(&app.server).await;
    let intruder = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &owner, json!({ "name": "Stretch" })).await);
    let reminder = create_reminder(&app, &owner, &habit_id).await;
    let reminder_id = reminder["reminderId"].as_str().unwrap();

    let reschedule = app
        .server
        .put("/api/reminders/update")
        .authorization_bearer(&intruder.token)
        .json(&json!({ "reminderId": reminder_id, "date": "2030-02-15", "time": "19:45" }))
        .await;
    assert_api_error!(reschedule, StatusCode::NOT_FOUND, "Reminder not found");

    let delete = app
        .server
        .delete(&format!("/api/reminders/{}", reminder_id))
        .authorization_bearer(&intruder.token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);

    let create = app
        .server
        .post("/api/reminders")
        .authorization_bearer(&intruder.token)
        .json(&json!({ "habitId": habit_id }))
        .await;
    assert_eq!(create.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_reminder() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let habit_id = id_of(&create_habit(&app.server, &user, json!({ "name": "Stretch" })).await);
    let reminder = create_reminder(&app, &user, &habit_id).await;
    let path = format!("/api/reminders/{}", reminder["reminderId"].as_str().unwrap());

    let response = app.server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app.server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
