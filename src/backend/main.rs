/**
 * CRM + HRMS Server Entry Point
 *
 * Loads `.env`, initializes tracing, validates settings and serves the API.
 */

use crm_hrms::backend::server::create_app;
use crm_hrms::shared::config::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("crm_hrms=debug,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = Settings::from_env()?;
    if settings.debug {
        tracing::warn!("DEBUG is enabled; do not run this configuration in production");
    }
    let addr = settings.bind_address();

    let app = create_app(settings).await?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
