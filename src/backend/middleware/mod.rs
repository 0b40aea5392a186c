//! Middleware Module
//!
//! This module contains the HTTP middleware and request extractors used by
//! the backend.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer-token authentication middleware and the `AuthUser` extractor
//! - **`extract`** - `ApiJson` body extractor and path id parsing
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use streakly::backend::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/api/habits", get(list_habits))
//!     .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));
//! ```

pub mod auth;
pub mod extract;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use extract::{parse_id, ApiJson};
