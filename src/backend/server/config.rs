/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * the creation of the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Later sources override earlier ones:
 *
 * 1. Built-in defaults
 * 2. A TOML file, if `STREAKLY_CONFIG` points at one
 * 3. Environment variables (a `.env` file is loaded first when present)
 *
 * | key              | env var                  | default                          |
 * |------------------|--------------------------|----------------------------------|
 * | `host`           | `HOST`                   | `0.0.0.0`                        |
 * | `port`           | `PORT` / `SERVER_PORT`   | `5000`                           |
 * | `database_url`   | `DATABASE_URL`           | `sqlite://streakly.db?mode=rwc`  |
 * | `token_ttl_days` | `TOKEN_TTL_DAYS`         | `30`                             |
 * | `bcrypt_cost`    | `BCRYPT_COST`            | `10`                             |
 * | `cors_origins`   | `CORS_ORIGINS` (comma separated) | `http://localhost:3000`  |
 *
 * # Error Handling
 *
 * Configuration errors are fatal. Database errors are logged and leave the
 * server running without a pool; handlers then answer 503.
 */

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Transaction;
use thiserror::Error;

/// Environment variable naming an optional TOML configuration file
pub const CONFIG_PATH_ENV: &str = "STREAKLY_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("{0}")]
    Invalid(String),
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Lifetime of issued auth tokens
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: "sqlite://streakly.db?mode=rwc".to_string(),
            token_ttl_days: 30,
            bcrypt_cost: 10,
            cors_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from the file named by `STREAKLY_CONFIG` (if any)
    /// and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let base = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply overrides from a key lookup, normally `std::env::var`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            self.port = parse_value("port", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(ttl) = lookup("TOKEN_TTL_DAYS") {
            self.token_ttl_days = parse_value("token_ttl_days", &ttl)?;
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_value("bcrypt_cost", &cost)?;
        }
        if let Some(origins) = lookup("CORS_ORIGINS") {
            self.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid("port must not be 0".to_string()));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::Invalid(
                "bcrypt_cost must be between 4 and 31".to_string(),
            ));
        }
        if self.token_ttl_days < 1 {
            return Err(ConfigError::Invalid(
                "token_ttl_days must be at least 1".to_string(),
            ));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must be set".to_string()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "host",
                value: self.host.clone(),
            })
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Database configuration result
///
/// Contains the connection pool if the database came up, `None` otherwise.
pub type DatabaseConfig = Option<SqlitePool>;

/// Open a SQLite pool for `database_url`.
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    pool_options.connect_with(options).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Run the embedded migrations from `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}

/// Begin a transaction that takes SQLite's write lock up front.
///
/// A deferred transaction that reads and then writes cannot upgrade its lock
/// while another writer is active and fails with `SQLITE_BUSY` at once.
/// `BEGIN IMMEDIATE` waits on the busy timeout instead, so read-check-write
/// sequences (the habit quota) serialize.
pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Load and initialize the database connection pool
///
/// 1. Connects to `config.database_url`
/// 2. Runs database migrations
///
/// Returns `None` if the connection or the migrations fail; the error is
/// logged and the server keeps running with database features disabled.
pub async fn load_database(config: &ServerConfig) -> DatabaseConfig {
    tracing::info!("Connecting to database...");

    let pool = match connect_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    if let Err(e) = run_migrations(&pool).await {
        tracing::error!("Failed to run database migrations: {}", e);
        tracing::warn!("Database features will be disabled.");
        return None;
    }

    tracing::info!("Database ready");
    Some(pool)
}
