/**
 * Server Initialization
 *
 * Builds the application from validated settings:
 *
 * 1. Open the store named by `DATABASE_URL` (offline fallback on failure)
 * 2. Declare collection indexes
 * 3. Build the auth service and application state
 * 4. Assemble the router
 */

use axum::Router;

use crate::backend::database::{Dal, DATABASE_INDEXES};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::shared::config::{ConfigError, Settings};

/// Create the application with the store named in `settings`
pub async fn create_app(settings: Settings) -> Result<Router<()>, ConfigError> {
    tracing::info!(
        "Initializing {} v{} ({})",
        settings.app_name,
        settings.app_version,
        settings.environment
    );

    let dal = load_store(&settings).await;
    create_app_with_store(settings, dal).await
}

/// Create the application on an already-opened store
///
/// Index declaration failures are logged, not fatal: an offline store
/// cannot take them, and the server should still answer health checks.
pub async fn create_app_with_store(settings: Settings, dal: Dal) -> Result<Router<()>, ConfigError> {
    if let Err(e) = dal.declare_indexes(DATABASE_INDEXES).await {
        tracing::warn!("Indexes not declared on {} store: {}", dal.backend_name(), e);
    }

    let app_state = AppState::new(settings, dal)?;
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
