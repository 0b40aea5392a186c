/**
 * Server Initialization
 *
 * This module handles the initialization of the Axum application: database
 * loading, state creation, background tasks and route configuration.
 *
 * # Initialization Process
 *
 * 1. Load the database (connect and migrate)
 * 2. Build `AppState` from the pool and the configuration
 * 3. Spawn the expired-token purge task
 * 4. Create and configure the router
 */

use std::time::Duration;

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::auth::sessions;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// How often expired auth tokens are purged
const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(3600);

/// Create and configure the Axum application
///
/// # Error Handling
///
/// A database that cannot be opened or migrated is logged and the server
/// still starts; every data endpoint then answers 503.
pub async fn create_app(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing Streakly backend server");

    let db_pool = load_database(config).await;

    if let Some(pool) = &db_pool {
        spawn_token_purge(pool.clone());
    }

    let app_state = AppState::new(db_pool, config.clone());
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}

/// Periodically delete expired auth tokens
///
/// Expired tokens are already rejected (and removed) when presented; this
/// keeps tokens that are never presented again from piling up.
fn spawn_token_purge(pool: SqlitePool) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TOKEN_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match sessions::delete_expired_tokens(&pool).await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!("Purged {} expired auth tokens", removed),
                Err(e) => tracing::warn!("Failed to purge expired auth tokens: {:?}", e),
            }
        }
    });
}
