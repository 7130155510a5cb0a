/**
 * Router Configuration
 *
 * Assembles system and API routes into one router and applies the
 * cross-cutting layers.
 *
 * # Layers
 *
 * - `TraceLayer` - one span per request, logged through `tracing`
 * - `CorsLayer` - any origin, method and header; `X-Total-Count` is exposed
 *   so browser clients can paginate
 */

use axum::{
    http::{header::HeaderName, Uri},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::system_routes::configure_system_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// 1. **System Routes**: `/`, `/health`, `/api/v1/status`
/// 2. **API Routes**: auth, users and resources under `/api/v1`
/// 3. **Fallback**: JSON 404 for anything else
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_system_routes(router);
    let router = configure_api_routes(router, &app_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static("x-total-count")]);

    router
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn fallback(uri: Uri) -> BackendError {
    tracing::debug!("No route for {}", uri);
    BackendError::NotFound { resource: "Route" }
}
