//! Database test fixtures and utilities
//!
//! Every fixture gets its own in-memory SQLite database with the schema
//! migrated, so tests never share state.

use axum_test::TestServer;
use sqlx::SqlitePool;
use streakly::backend::routes::create_router;
use streakly::backend::server::config::{connect_pool, run_migrations, ServerConfig};
use streakly::backend::server::state::AppState;

/// Create a migrated in-memory database pool
pub async fn create_test_pool() -> SqlitePool {
    let pool = connect_pool("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Configuration for tests: the cheapest bcrypt cost keeps hashing fast
pub fn test_config() -> ServerConfig {
    ServerConfig {
        bcrypt_cost: 4,
        ..ServerConfig::default()
    }
}

/// Test application fixture
///
/// Holds the in-process server and the pool behind it, so tests can both
/// drive the HTTP API and inspect or seed rows directly.
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = create_test_pool().await;
        let app_state = AppState::new(Some(pool.clone()), test_config());
        let server =
            TestServer::new(create_router(app_state)).expect("Failed to start test server");
        Self { server, pool }
    }

    /// A server whose database could not be opened
    pub fn without_database() -> TestServer {
        let app_state = AppState::new(None, test_config());
        TestServer::new(create_router(app_state)).expect("Failed to start test server")
    }
}
