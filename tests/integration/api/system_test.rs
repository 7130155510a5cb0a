//! System endpoint tests

use axum::http::{header, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::*;

#[tokio::test]
async fn test_root() {
    let server = test_server().await;
    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "active");
    assert_eq!(body["message"], "CRM + HRMS API is running");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_health_reports_connected_store() {
    let server = test_server().await;
    let body: Value = server.get("/health").await.json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["environment"], "test");
}

#[tokio::test]
async fn test_health_reports_disconnected_store() {
    let server = offline_test_server().await;
    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_api_status() {
    let server = test_server().await;
    let body: Value = server.get("/api/v1/status").await.json();

    assert_eq!(body["api_version"], "v1");
    for module in ["crm", "hrms", "auth"] {
        assert_eq!(body["modules"][module], "initialized");
    }
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = test_server().await;
    let response = server.get("/api/v2/nothing").await;
    assert_error_body!(response, StatusCode::NOT_FOUND, "Route not found");
}

#[tokio::test]
async fn test_cors_exposes_total_count() {
    let server = test_server().await;
    let response = server
        .get("/health")
        .add_header(
            header::ORIGIN,
            HeaderValue::from_static("http://localhost:3000"),
        )
        .await;

    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_contains!(
        response
            .header("access-control-expose-headers")
            .to_str()
            .unwrap()
            .to_lowercase(),
        "x-total-count"
    );
}
