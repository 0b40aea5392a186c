/**
 * Logout Handler
 *
 * POST /api/auth/logout deletes the token the request was made with. Other
 * tokens of the same user (other devices) stay valid.
 */

use axum::{extract::State, Json};

use crate::backend::auth::sessions::delete_token;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

pub async fn logout(
    State(app_state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ApiResponse<()>>, BackendError> {
    let pool = app_state.pool()?;
    delete_token(pool, &user.token).await?;

    tracing::info!("User {} logged out", user.user_id);
    Ok(Json(ApiResponse::with_message("Logged out successfully", ())))
}
