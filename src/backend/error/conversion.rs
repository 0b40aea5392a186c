/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, plus translation of sqlx errors.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "message": "Error message",
 *   "status": 400
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("Rejected request: {}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        let body = serde_json::json!({
            "success": false,
            "message": self.message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Check whether an sqlx error is a UNIQUE constraint violation
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
