//! Authentication Module
//!
//! This module handles registration, login and the bearer tokens that
//! authenticate every other request.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations
//! - **`sessions`** - Token issuance, lookup, expiry and password hashing
//! - **`handlers`** - HTTP handlers for `/api/auth`
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - Auth tokens and password hashing
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration
//!     ├── login.rs    - User authentication
//!     ├── logout.rs   - Token revocation
//!     └── profile.rs  - Profile read and update
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email and password → user created → token returned
//! 2. **Login**: email and password verified → new token returned
//! 3. **Requests**: `Authorization: Bearer <token>` checked by `auth_middleware`
//! 4. **Logout**: the presented token is deleted
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Tokens are random UUIDs stored server-side with an expiry (30 days by default)
//! - Expired tokens are rejected and deleted
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// Token and password management
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{get_profile, login, logout, register, update_profile, verify_token};
