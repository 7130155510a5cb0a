//! Resource API integration tests
//!
//! CRUD, pagination, filters and derived fields across the CRM and HRMS
//! collections.

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::*;

async fn create(server: &TestServer, token: &str, path: &str, body: Value) -> Value {
    let response = server.post(path).authorization_bearer(token).json(&body).await;
    assert_eq!(response.status_code(), StatusCode::OK, "create failed: {}", response.text());
    response.json()
}

#[tokio::test]
async fn test_resources_require_authentication() {
    let server = test_server().await;

    for path in [
        "/api/v1/customers",
        "/api/v1/leads",
        "/api/v1/deals",
        "/api/v1/employees",
        "/api/v1/departments",
        "/api/v1/attendance",
        "/api/v1/leave-requests",
        "/api/v1/users",
    ] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{} is not protected", path);
    }
}

#[tokio::test]
async fn test_customer_crud() {
    let server = test_server().await;
    let user = create_unique_test_user(&server).await;

    let customer = create(
        &server,
        &user.token,
        "/api/v1/customers",
        json!({"name": "Acme", "company": "Acme Ltd", "email": "ops@acme.test"}),
    )
    .await;
    assert_eq!(customer["status"], "prospect");
    assert_eq!(customer["created_by"], user.id.as_str());
    let id = customer["id"].as_str().unwrap().to_string();
    let path = format!("/api/v1/customers/{}", id);

    let fetched: Value = server.get(&path).authorization_bearer(&user.token).await.json();
    assert_eq!(fetched, customer);

    let response = server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({"status": "active", "notes": "signed"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["status"], "active");
    assert_eq!(updated["notes"], "signed");
    assert_eq!(updated["name"], "Acme");
    assert_eq!(updated["created_at"], customer["created_at"]);

    let response = server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({}))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST, "No fields to update");

    let response = server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body, json!({"message": "Customer deleted successfully"}));

    let response = server.get(&path).authorization_bearer(&user.token).await;
    assert_error_body!(response, StatusCode::NOT_FOUND, "Customer not found");

    let response = server.delete(&path).authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    let response = server
        .put(&path)
        .authorization_bearer(&user.token)
        .json(&json!({"notes": "too late"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let server = test_server().await;
    let user = create_unique_test_user(&server).await;

    let response = server
        .get("/api/v1/leads/not-a-uuid")
        .authorization_bearer(&user.token)
        .await;
    assert_error_body!(response, StatusCode::NOT_FOUND, "Lead not found");
}

#[tokio::test]
async fn test_list_pagination_and_filters() {
    let server = test_server().await;
    let user = create_unique_test_user(&server).await;

    for i in 0..5 {
        let status = if i % 2 == 0 { "new" } else { "qualified" };
        create(
            &server,
            &user.token,
            "/api/v1/leads",
            json!({"name": format!("Lead {}", i), "status": status, "source": "web"}),
        )
        .await;
    }

    let response = server
        .get("/api/v1/leads")
        .authorization_bearer(&user.token)
        .add_query_param("skip", 1)
        .add_query_param("limit", 2)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("x-total-count"), "5");
    let page: Vec<Value> = response.json();
    let names: Vec<&str> = page.iter().map(|l| l["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Lead 1", "Lead 2"]);

    let response = server
        .get("/api/v1/leads")
        .authorization_bearer(&user.token)
        .add_query_param("status", "new")
        .await;
    assert_eq!(response.header("x-total-count"), "3");
    let new_leads: Vec<Value> = response.json();
    assert!(new_leads.iter().all(|l| l["status"] == "new"));

    let response = server
        .get("/api/v1/leads")
        .authorization_bearer(&user.token)
        .add_query_param("name", "Lead 1")
        .await;
    assert_eq!(response.header("x-total-count"), "5");

    let response = server
        .get("/api/v1/leads")
        .authorization_bearer(&user.token)
        .add_query_param("limit", "lots")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_employee_unique_fields() {
    let server = test_server().await;
    let user = create_test_user(&server, "hr@x.com", "hr_manager").await;
    let employee = json!({
        "employee_id": "E-001",
        "full_name": "Bo",
        "email": "bo@x.com",
        "position": "Engineer",
        "hire_date": "2024-01-15",
        "salary": 72000.0
    });

    let created = create(&server, &user.token, "/api/v1/employees", employee.clone()).await;
    assert_eq!(created["status"], "active");
    assert_eq!(created["hire_date"], "2024-01-15");

    let response = server
        .post("/api/v1/employees")
        .authorization_bearer(&user.token)
        .json(&employee)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_contains!(response.text(), "already exists");

    let response = server
        .post("/api/v1/employees")
        .authorization_bearer(&user.token)
        .json(&json!({
            "employee_id": "E-002",
            "full_name": "Bo Again",
            "email": "BO@X.com",
            "position": "Engineer",
            "hire_date": "2024-02-01"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_contains!(response.text(), "already exists");

    let renamed: Value = server
        .put(&format!("/api/v1/employees/{}", created["id"].as_str().unwrap()))
        .authorization_bearer(&user.token)
        .json(&json!({"email": "Bo.Renamed@X.com"}))
        .await
        .json();
    assert_eq!(renamed["email"], "bo.renamed@x.com");
}

#[tokio::test]
async fn test_department_and_deal() {
    let server = test_server().await;
    let user = create_test_user(&server, "sales@x.com", "sales_team").await;

    create(&server, &user.token, "/api/v1/departments", json!({"name": "Sales"})).await;
    let response = server
        .post("/api/v1/departments")
        .authorization_bearer(&user.token)
        .json(&json!({"name": "Sales"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let customer = create(
        &server,
        &user.token,
        "/api/v1/customers",
        json!({"name": "Acme", "company": "Acme Ltd"}),
    )
    .await;
    let deal = create(
        &server,
        &user.token,
        "/api/v1/deals",
        json!({"name": "Renewal", "customer_id": customer["id"], "value": 12000.0}),
    )
    .await;
    assert_eq!(deal["stage"], "prospecting");
    assert_eq!(deal["probability"], 10);
    assert!(deal["actual_close_date"].is_null());

    let response = server
        .put(&format!("/api/v1/deals/{}", deal["id"].as_str().unwrap()))
        .authorization_bearer(&user.token)
        .json(&json!({"stage": "closed_won", "probability": 100}))
        .await;
    let closed: Value = response.json();
    assert_eq!(closed["stage"], "closed_won");
    assert!(closed["actual_close_date"].is_string());

    let by_customer = server
        .get("/api/v1/deals")
        .authorization_bearer(&user.token)
        .add_query_param("customer_id", customer["id"].as_str().unwrap())
        .await;
    assert_eq!(by_customer.header("x-total-count"), "1");
}

#[tokio::test]
async fn test_attendance_derived_fields() {
    let server = test_server().await;
    let user = create_test_user(&server, "hr@x.com", "hr_manager").await;

    let record = create(
        &server,
        &user.token,
        "/api/v1/attendance",
        json!({"employee_id": "E-001", "check_in": "2025-03-10T09:00:00Z"}),
    )
    .await;
    assert_eq!(record["date"], "2025-03-10");
    assert_eq!(record["status"], "present");
    assert!(record["total_hours"].is_null());

    let response = server
        .put(&format!("/api/v1/attendance/{}", record["id"].as_str().unwrap()))
        .authorization_bearer(&user.token)
        .json(&json!({"check_out": "2025-03-10T17:45:00Z"}))
        .await;
    let updated: Value = response.json();
    assert_approx_eq!(updated["total_hours"].as_f64().unwrap(), 8.75, 1e-9);

    let response = server
        .post("/api/v1/attendance")
        .authorization_bearer(&user.token)
        .json(&json!({"employee_id": "E-001", "check_in": "2025-03-10T13:00:00Z"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/v1/attendance")
        .authorization_bearer(&user.token)
        .json(&json!({
            "employee_id": "E-002",
            "check_in": "2025-03-10T13:00:00Z",
            "check_out": "2025-03-10T12:00:00Z"
        }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST, "check_out must not be before check_in");
}

#[tokio::test]
async fn test_leave_request_flow() {
    let server = test_server().await;
    let employee = create_test_user(&server, "emp@x.com", "employee").await;
    let manager = create_test_user(&server, "mgr@x.com", "hr_manager").await;

    let request = create(
        &server,
        &employee.token,
        "/api/v1/leave-requests",
        json!({
            "employee_id": "E-001",
            "leave_type": "annual",
            "start_date": "2025-07-01",
            "end_date": "2025-07-05"
        }),
    )
    .await;
    assert_eq!(request["total_days"], 5);
    assert_eq!(request["status"], "pending");
    assert!(request["approved_by"].is_null());

    let response = server
        .put(&format!("/api/v1/leave-requests/{}", request["id"].as_str().unwrap()))
        .authorization_bearer(&manager.token)
        .json(&json!({"status": "approved"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let approved: Value = response.json();
    assert_eq!(approved["status"], "approved");
    assert_eq!(approved["approved_by"], manager.id.as_str());
    assert!(approved["approved_at"].is_string());

    let response = server
        .post("/api/v1/leave-requests")
        .authorization_bearer(&employee.token)
        .json(&json!({
            "employee_id": "E-001",
            "leave_type": "sick",
            "start_date": "2025-07-05",
            "end_date": "2025-07-01"
        }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST, "end_date must not be before start_date");
}

#[tokio::test]
async fn test_resources_report_store_outage() {
    let online = test_server_with(memory_dal().await).await;
    let user = create_unique_test_user(&online).await;

    // Tokens are stateless, but resolving the subject needs the store.
    let offline = offline_test_server().await;
    let response = offline
        .get("/api/v1/customers")
        .authorization_bearer(&user.token)
        .await;
    assert_error_body!(response, StatusCode::SERVICE_UNAVAILABLE, "Database not available");

    let response = offline
        .get(&format!("/api/v1/customers/{}", user.id))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let response = offline.get("/api/v1/customers").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
