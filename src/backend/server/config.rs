/**
 * Store Selection
 *
 * Chooses the record store from `DATABASE_URL`:
 *
 * - `memory` - in-process store, lost on exit
 * - anything else - a SQLite URL (`sqlite:crm_hrms_db.sqlite`, `sqlite::memory:`)
 *
 * When the database cannot be opened the server still starts, on the
 * offline store: reads come back empty and writes answer 503.
 */

use crate::backend::database::{Dal, MemoryStore, OfflineStore, SqliteStore};
use crate::shared::config::Settings;

pub const MEMORY_STORE_URL: &str = "memory";

/// Open the configured store, falling back to the offline store
pub async fn load_store(settings: &Settings) -> Dal {
    let url = settings.database_url.trim();

    if url.eq_ignore_ascii_case(MEMORY_STORE_URL) {
        tracing::warn!("Using the in-memory store; data will not survive a restart");
        return Dal::with_store(MemoryStore::new());
    }

    tracing::info!("Connecting to database...");
    match SqliteStore::connect(url, settings.database_timeout).await {
        Ok(store) => {
            tracing::info!("Database connected and migrated");
            Dal::with_store(store)
        }
        Err(e) => {
            tracing::error!("Failed to open database: {}", e);
            tracing::warn!("Database features will be disabled.");
            Dal::with_store(OfflineStore::new(e.to_string()))
        }
    }
}
