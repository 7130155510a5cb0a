//! Authentication Module
//!
//! Password hashing, access tokens, the user store and the service that
//! ties them together.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── password.rs  - bcrypt hashing
//! ├── sessions.rs  - JWT issue and verify
//! ├── users.rs     - User model and DAL operations
//! ├── service.rs   - Register, login, resolve-current-user
//! └── handlers/    - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: email, name and password → account created (no token)
//! 2. **Login**: email and password → credentials verified → bearer token
//! 3. **Me**: bearer token → token verified → account looked up by `sub`
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Tokens are stateless; nothing is stored server-side
//! - Tokens expire after `ACCESS_TOKEN_EXPIRE_MINUTES` (default 30)
//! - Unknown email and wrong password return the same 401

/// bcrypt password hashing
pub mod password;

/// JWT token generation and validation
pub mod sessions;

/// User data model and database operations
pub mod users;

/// Register, login and token resolution
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{LoginRequest, ProfileUpdate, RegisterRequest, TokenResponse, UserResponse};
pub use password::PasswordHasher;
pub use service::AuthService;
pub use sessions::{Claims, TokenCodec, TokenError};
pub use users::User;
