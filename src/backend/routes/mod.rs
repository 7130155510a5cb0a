//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports
//! ├── router.rs         - Router assembly and layers
//! ├── system_routes.rs  - /, /health, /api/v1/status
//! └── api_routes.rs     - /api/v1 auth, users and resources
//! ```
//!
//! Protected routes are wrapped with the auth middleware as a
//! `route_layer`, so unknown paths still fall through to the JSON 404
//! instead of answering 401.

pub mod api_routes;
pub mod router;
pub mod system_routes;

pub use router::create_router;
