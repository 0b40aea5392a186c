//! Server Module
//!
//! This module contains the code that configures and boots the Axum HTTP
//! server.
//!
//! # Architecture
//!
//! - **`config`** - `ServerConfig` loading (defaults, TOML file, environment) and database setup
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - Application creation and background tasks
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::load()`
//! 2. **Database**: pool creation and embedded migrations
//! 3. **State Creation**: `AppState` wraps the pool and the config
//! 4. **Background Tasks**: periodic purge of expired auth tokens
//! 5. **Router Creation**: all routes, auth middleware, tracing and CORS layers

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::ServerConfig;
pub use init::create_app;
pub use state::AppState;
