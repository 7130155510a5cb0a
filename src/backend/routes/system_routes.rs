/**
 * System Routes
 *
 * Liveness and status endpoints. None of them require authentication and
 * none of them fail when the store is down; `/health` reports it instead.
 */

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::backend::server::state::AppState;

pub fn configure_system_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/v1/status", get(api_status))
}

/// GET /
async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "CRM + HRMS API is running",
        "version": state.settings.app_version,
        "status": "active",
    }))
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = if state.dal.is_connected().await {
        "connected"
    } else {
        "disconnected"
    };

    Json(json!({
        "status": "healthy",
        "database": database,
        "database_name": state.settings.database_name,
        "environment": state.settings.environment,
    }))
}

/// GET /api/v1/status
async fn api_status() -> Json<Value> {
    Json(json!({
        "api_version": "v1",
        "modules": {
            "crm": "initialized",
            "hrms": "initialized",
            "auth": "initialized",
        },
    }))
}
