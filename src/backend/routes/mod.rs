//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, fallback and layers
//! - **`api_routes`** - Public and protected `/api` route groups
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint groups
//! ```
//!
//! # Authentication
//!
//! Only `/api/health`, `/api`, `/api/auth/register` and `/api/auth/login`
//! are public. Everything else requires `Authorization: Bearer <token>`;
//! missing, unknown and expired tokens are answered with 401 before any
//! handler runs.
//!
//! # Example
//!
//! ```rust,no_run
//! use streakly::backend::routes::create_router;
//! use streakly::backend::server::{config::ServerConfig, state::AppState};
//!
//! let app_state = AppState::new(None, ServerConfig::default());
//! let router = create_router(app_state);
//! ```

/// Main router creation
pub mod router;

/// API endpoint groups
pub mod api_routes;

pub use router::create_router;
