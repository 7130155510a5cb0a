//! Backend Module
//!
//! The HTTP server: an Axum application over a pluggable record store.
//!
//! # Architecture
//!
//! - **`server`** - Startup, application state, store selection
//! - **`routes`** - Router assembly
//! - **`auth`** - Password hashing, tokens, users, auth service and handlers
//! - **`middleware`** - Bearer-token guard
//! - **`resources`** - Generic CRUD for CRM and HRMS collections
//! - **`database`** - Data access layer and store adapters
//! - **`error`** - `BackendError` and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs       - Module exports and documentation
//! ├── main.rs      - Binary entry point
//! ├── server/      - Startup and state
//! ├── routes/      - Route configuration
//! ├── auth/        - Authentication
//! ├── middleware/  - Request middleware
//! ├── resources/   - CRM/HRMS resources
//! ├── database/    - DAL and adapters
//! └── error/       - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the settings, the `Dal` and the `AuthService`. All three
//! are read-only after startup; the store adapters do their own locking.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// CRM and HRMS resources
pub mod resources;

/// Data access layer
pub mod database;

pub use error::BackendError;
pub use server::{create_app, AppState};
