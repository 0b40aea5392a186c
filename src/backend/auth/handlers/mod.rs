//! Authentication Handlers
//!
//! - **`types`** - Request/response types
//! - **`register`** - `POST /api/auth/register`
//! - **`login`** - `POST /api/auth/login`
//! - **`logout`** - `POST /api/auth/logout`
//! - **`profile`** - `GET` / `PUT /api/auth/profile`, `GET /api/auth/verify`

pub mod types;
pub mod register;
pub mod login;
pub mod logout;
pub mod profile;

pub use login::login;
pub use logout::logout;
pub use profile::{get_profile, update_profile, verify_token};
pub use register::register;
