//! Report API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{create_habit, id_of, register_unique_user, TestApp};

#[tokio::test]
async fn test_empty_report_defaults_to_weekly() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .get("/api/reports")
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["dateRange"], "weekly");
    assert_eq!(body["data"]["completionRate"], 0);
    assert_eq!(body["data"]["totalHabits"], 0);
}

#[tokio::test]
async fn test_daily_report() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;
    let read = id_of(&create_habit(&app.server, &user, json!({ "name": "Read" })).await);
    create_habit(&app.server, &user, json!({ "name": "Run" })).await;

    // Defaults to today's date
    app.server
        .post("/api/habitLogs")
        .authorization_bearer(&user.token)
        .json(&json!({ "habitId": read }))
        .await;

    let body: Value = app
        .server
        .get("/api/reports")
        .add_query_param("range", "daily")
        .authorization_bearer(&user.token)
        .await
        .json();

    let report = &body["data"];
    assert_eq!(report["dateRange"], "daily");
    assert_eq!(report["completionRate"], 50);
    assert_eq!(report["totalCompleted"], 1);
    assert_eq!(report["totalHabits"], 2);
    assert_eq!(report["averageStreak"], 0.5);
    assert_eq!(report["bestStreak"], 1);
}

#[tokio::test]
async fn test_unknown_range_rejected() {
    let app = TestApp::new().await;
    let user = register_unique_user(&app.server).await;

    let response = app
        .server
        .get("/api/reports")
        .add_query_param("range", "hourly")
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
