//! Server Module
//!
//! Application state, store selection and startup.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs    - Module exports
//! ├── state.rs  - AppState and FromRef sub-states
//! ├── config.rs - Store selection from DATABASE_URL
//! └── init.rs   - create_app
//! ```

/// Application state management
pub mod state;

/// Store selection
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, create_app_with_store};
pub use state::AppState;
