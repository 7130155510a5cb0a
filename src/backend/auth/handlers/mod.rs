//! Authentication Handlers Module
//!
//! HTTP handlers for the auth and user endpoints. Each handler is a thin
//! wrapper over [`AuthService`](crate::backend::auth::service::AuthService).
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! ├── register.rs - POST /api/v1/auth/register
//! ├── login.rs    - POST /api/v1/auth/login
//! ├── me.rs       - GET /api/v1/auth/me, PUT /api/v1/users/me
//! └── users.rs    - GET /api/v1/users
//! ```

/// Request and response types
pub mod types;

/// Register handler
pub mod register;

/// Login handler
pub mod login;

/// Current user handlers
pub mod me;

/// User listing handler
pub mod users;

pub use types::{LoginRequest, ProfileUpdate, RegisterRequest, TokenResponse, UserResponse};

pub use login::{login, LoginCredentials};
pub use me::{get_me, update_me};
pub use register::register;
pub use users::list_users;
