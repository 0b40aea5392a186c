/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route groups into a single Axum router.
 *
 * # Assembly
 *
 * 1. Public API routes (health, register, login)
 * 2. Protected API routes (behind the auth middleware)
 * 3. Fallback handler (JSON 404)
 * 4. CORS for the configured frontend origins
 */

use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{configure_public_routes, protected_routes};
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and configuration shared by all handlers
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config);

    let router = configure_public_routes(Router::new())
        .merge(protected_routes(app_state.clone()))
        .fallback(|| async { BackendError::not_found("Route") });

    router.layer(cors).with_state(app_state)
}

/// CORS for the configured frontend origins
///
/// Origins that are not valid header values are skipped with a warning.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
