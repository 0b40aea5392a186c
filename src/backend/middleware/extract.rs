/**
 * Request Extractors
 *
 * `ApiJson` wraps axum's `Json` so malformed bodies are answered with the
 * API's error envelope instead of axum's plain-text rejection. Path ids are
 * parsed with [`parse_id`]; an id that is not a UUID cannot name an
 * existing record and is reported as not found.
 */

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// JSON body extractor with enveloped 400 rejections
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> BackendError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Expected request with `Content-Type: application/json`".to_string()
        }
        _ => rejection.body_text(),
    };
    BackendError::bad_request(message)
}

/// Parse a path id, reporting malformed ids as a missing `resource`
pub fn parse_id(raw: &str, resource: &'static str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(raw).map_err(|_| BackendError::not_found(resource))
}
