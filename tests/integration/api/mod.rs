//! API integration tests
//!
//! Every test drives the full router through `axum_test::TestServer`.

mod resources_test;
mod system_test;
