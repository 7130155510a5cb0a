//! Middleware Module
//!
//! HTTP middleware applied to protected routes.
//!
//! - **`auth`** - Bearer-token authentication and the `AuthUser` extractor
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use crm_hrms::backend::auth::AuthService;
//! use crm_hrms::backend::middleware::{auth_middleware, AuthUser};
//!
//! fn protected(auth: AuthService) -> Router {
//!     Router::new()
//!         .route("/me", get(|AuthUser(user): AuthUser| async move { user.email }))
//!         .route_layer(middleware::from_fn_with_state(auth.clone(), auth_middleware))
//!         .with_state(auth)
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthUser, AuthenticatedUser};
