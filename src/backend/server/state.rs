/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct holds:
 * - The optional SQLite connection pool
 * - The immutable server configuration
 *
 * # Thread Safety
 *
 * `SqlitePool` is internally reference counted and the configuration is
 * behind an `Arc`, so cloning `AppState` per request is cheap.
 *
 * # Example
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use streakly::backend::server::state::AppState;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let pool = state.pool()?;
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::server::config::ServerConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// `None` when the database could not be opened at startup. Handlers go
    /// through [`AppState::pool`], which maps that case to a 503.
    pub db_pool: Option<SqlitePool>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(db_pool: Option<SqlitePool>, config: ServerConfig) -> Self {
        Self {
            db_pool,
            config: Arc::new(config),
        }
    }

    /// Borrow the connection pool, or fail with `DatabaseUnavailable`.
    pub fn pool(&self) -> Result<&SqlitePool, BackendError> {
        self.db_pool.as_ref().ok_or(BackendError::DatabaseUnavailable)
    }
}

/// Implement FromRef for Option<SqlitePool>
///
/// This allows Axum handlers and middleware to extract the optional
/// database pool directly from `AppState`.
impl FromRef<AppState> for Option<SqlitePool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
