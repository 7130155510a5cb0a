//! Test server fixtures
//!
//! Builds the full router (same layers and middleware as production) over
//! a store chosen by the test, wrapped in an `axum_test::TestServer`.

use axum_test::TestServer;
use crm_hrms::backend::database::{Dal, MemoryStore, OfflineStore};
use crm_hrms::backend::server::create_app_with_store;
use crm_hrms::shared::config::Settings;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Settings with a fixed secret and the cheapest bcrypt cost
pub fn test_settings() -> Settings {
    Settings::builder()
        .secret_key(TEST_SECRET)
        .bcrypt_cost(4)
        .database_url("memory")
        .environment("test")
        .build()
        .expect("test settings are valid")
}

pub async fn test_server_with(dal: Dal) -> TestServer {
    let app = create_app_with_store(test_settings(), dal)
        .await
        .expect("Failed to build app");
    TestServer::new(app).expect("Failed to start test server")
}

/// Test server over a fresh in-memory store
pub async fn test_server() -> TestServer {
    test_server_with(Dal::with_store(MemoryStore::new())).await
}

/// Test server whose store is unreachable
pub async fn offline_test_server() -> TestServer {
    test_server_with(Dal::with_store(OfflineStore::new("test: no database"))).await
}
