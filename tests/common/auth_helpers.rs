//! Authentication test helpers
//!
//! Register and log in through the HTTP API, the way a client would.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "test_password_123";

/// Test user credentials
pub struct TestUser {
    pub id: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// POST /api/v1/auth/register and return the raw response body
pub async fn register(server: &TestServer, email: &str, password: &str, role: &str) -> Value {
    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({
            "email": email,
            "full_name": "Test User",
            "password": password,
            "role": role,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "register failed: {}", response.text());
    response.json()
}

/// Log in with the OAuth2 form body and return the access token
pub async fn login_token(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/v1/auth/login")
        .form(&[("username", email), ("password", password)])
        .await;
    assert_eq!(response.status_code(), StatusCode::OK, "login failed: {}", response.text());
    let body: Value = response.json();
    body["access_token"]
        .as_str()
        .expect("access_token is a string")
        .to_string()
}

/// Register and log in a user
pub async fn create_test_user(server: &TestServer, email: &str, role: &str) -> TestUser {
    let created = register(server, email, TEST_PASSWORD, role).await;
    let token = login_token(server, email, TEST_PASSWORD).await;

    TestUser {
        id: created["id"].as_str().expect("id is a string").to_string(),
        email: created["email"].as_str().expect("email is a string").to_string(),
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

/// Create a test user with a unique email
pub async fn create_unique_test_user(server: &TestServer) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4().simple());
    create_test_user(server, &email, "employee").await
}
