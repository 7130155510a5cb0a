//! CRM + HRMS - Main Library
//!
//! A JSON API for customer relationship management (customers, leads,
//! deals) and human resources (employees, departments, attendance, leave),
//! with bearer-token authentication.
//!
//! # Module Structure
//!
//! - **`shared`** - Configuration, enums and shared error types
//! - **`backend`** - Axum server, auth, data access layer and resources
//!
//! # Usage
//!
//! ```rust,no_run
//! use crm_hrms::backend::server::create_app;
//! use crm_hrms::shared::config::Settings;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(Settings::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, `Option<T>` for lookups
//! - One `thiserror` enum per layer: `ConfigError`, `StoreError`,
//!   `DalError`, `TokenError`, `BackendError`

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
