//! Common test utilities and helpers
//!
//! - Test server construction over the in-memory store
//! - Database fixtures for the SQLite store
//! - Authentication helpers (register, login, tokens)
//! - Custom assertion macros

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;
pub mod server;

pub use auth_helpers::*;
pub use database::*;
pub use server::*;
