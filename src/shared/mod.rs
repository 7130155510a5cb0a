//! Shared Module
//!
//! Types that do not depend on the HTTP stack: settings, request-boundary
//! errors, and the enumerations stored on records.

/// Application configuration
pub mod config;

/// Shared error types
pub mod error;

/// Enumerations stored on records
pub mod enums;

pub use config::{ConfigError, Settings, SettingsBuilder};
pub use error::SharedError;
