/**
 * Authentication Handler Types
 *
 * Request and response types shared by the register, login and profile
 * handlers.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;
use crate::shared::PlanType;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Register request
///
/// Fields default to empty so a missing field is reported as a validation
/// error rather than a malformed body.
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request; absent fields are left unchanged
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    pub password: Option<String>,
    pub subscription_plan: Option<PlanType>,
}

/// Auth response
///
/// Returned by register and login. Contains the bearer token and the user.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    /// Opaque bearer token
    pub token: String,
    pub user: UserResponse,
}

/// Profile response for `GET`/`PUT /api/auth/profile`, keyed by `user` like
/// [`AuthResponse`]
#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: String,
    pub user: UserResponse,
}

impl ProfileResponse {
    pub fn new(message: impl Into<String>, user: UserResponse) -> Self {
        Self {
            success: true,
            message: message.into(),
            user,
        }
    }
}

/// Token verification response
#[derive(Serialize, Deserialize, Debug)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserResponse,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub is_pro: bool,
    pub subscription_plan: Option<PlanType>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            subscription_plan: user.plan(),
            user_id: user.id,
            name: user.name,
            email: user.email,
            is_pro: user.is_pro,
        }
    }
}
