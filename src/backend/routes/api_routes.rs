/**
 * API Route Handlers
 *
 * This module defines the `/api` endpoints, split into the public group
 * (health, registration, login) and the protected group that requires a
 * bearer token.
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/health` - Liveness check
 * - `GET /api` - Endpoint listing
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 *
 * ## Protected
 * - `/api/auth/...` - logout, verify, profile
 * - `/api/habits` - habit CRUD and next reminder
 * - `/api/habitLogs` - completion logs
 * - `/api/reminders` - reminder list, reschedule, create, delete
 * - `/api/subscriptions` - plans and habit limits
 * - `/api/reports` - completion reports
 */

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{get_profile, login, logout, register, update_profile, verify_token};
use crate::backend::habit_logs::handlers as habit_logs;
use crate::backend::habits::handlers as habits;
use crate::backend::middleware::auth_middleware;
use crate::backend::reminders::handlers as reminders;
use crate::backend::reports::get_report;
use crate::backend::server::state::AppState;
use crate::backend::subscription::api as subscriptions;

/// Endpoints listed by `GET /api`
const ENDPOINTS: &[&str] = &[
    "/api/health",
    "/api/auth",
    "/api/habits",
    "/api/habitLogs",
    "/api/reminders",
    "/api/subscriptions",
    "/api/reports",
];

async fn health() -> Json<Value> {
    Json(json!({ "success": true, "message": "Server is running" }))
}

async fn api_root() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "API root",
        "endpoints": ENDPOINTS,
    }))
}

/// Configure routes that need no authentication
pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/health", get(health))
        .route("/api", get(api_root))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Build the protected route group
///
/// Every route here runs behind `auth_middleware`, which rejects requests
/// without a live bearer token before the handler is reached. The layer is
/// added with `route_layer` so unknown paths still fall through to the
/// router's 404 fallback instead of answering 401.
pub fn protected_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        // Account
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/verify", get(verify_token))
        .route("/api/auth/profile", get(get_profile).put(update_profile))
        // Habits
        .route("/api/habits", get(habits::list_habits).post(habits::create_habit))
        .route(
            "/api/habits/{id}",
            get(habits::get_habit)
                .put(habits::update_habit)
                .delete(habits::delete_habit),
        )
        .route("/api/habits/{id}/next-reminder", get(habits::next_reminder))
        // Completion logs
        .route(
            "/api/habitLogs",
            get(habit_logs::list_logs).post(habit_logs::create_log),
        )
        .route(
            "/api/habitLogs/habit/{habit_id}",
            get(habit_logs::list_habit_logs),
        )
        .route(
            "/api/habitLogs/{id}",
            get(habit_logs::get_log)
                .put(habit_logs::update_log)
                .delete(habit_logs::delete_log),
        )
        // Reminders
        .route("/api/reminders/all", get(reminders::list_reminders))
        .route("/api/reminders/update", put(reminders::reschedule_reminder))
        .route("/api/reminders", post(reminders::create_reminder))
        .route("/api/reminders/{id}", delete(reminders::delete_reminder))
        // Subscriptions
        .route(
            "/api/subscriptions",
            get(subscriptions::list_subscriptions).post(subscriptions::create_subscription),
        )
        .route("/api/subscriptions/limits", get(subscriptions::get_limits))
        // Reports
        .route("/api/reports", get(get_report))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware))
}
