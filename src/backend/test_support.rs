//! Helpers for backend unit tests.

use std::path::Path;

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::{create_user, User};
use crate::backend::server::config::{connect_pool, run_migrations, ServerConfig};
use crate::backend::server::state::AppState;

/// Fresh migrated in-memory database
pub async fn test_pool() -> SqlitePool {
    let pool = connect_pool("sqlite::memory:")
        .await
        .expect("in-memory database");
    run_migrations(&pool).await.expect("migrations");
    pool
}

pub async fn test_state() -> AppState {
    let config = ServerConfig {
        database_url: "sqlite::memory:".to_string(),
        bcrypt_cost: 4,
        ..ServerConfig::default()
    };
    AppState::new(Some(test_pool().await), config)
}

/// Migrated state over a database file at `path`
pub async fn file_state(path: &Path) -> AppState {
    let url = format!("sqlite://{}", path.display());
    let pool = connect_pool(&url).await.expect("file database");
    run_migrations(&pool).await.expect("migrations");
    let config = ServerConfig {
        database_url: url,
        bcrypt_cost: 4,
        ..ServerConfig::default()
    };
    AppState::new(Some(pool), config)
}

/// Insert a user with a unique email and a placeholder hash
pub async fn seed_user(pool: &SqlitePool) -> User {
    let email = format!("user-{}@example.com", Uuid::new_v4());
    create_user(pool, "Test User", &email, "not-a-real-hash")
        .await
        .expect("seed user")
}
