//! Database Module
//!
//! Generic persistence for every collection in the service.
//!
//! # Architecture
//!
//! - **`record`** - `Record`, `Document`, `Filter` and `Page`
//! - **`adapter`** - the `RecordStore` trait storage engines implement
//! - **`dal`** - `Dal`, the contract handlers and services call
//! - **`indexes`** - collection names and the index declarations applied at startup
//! - **`sqlite`** - sqlx/SQLite adapter
//! - **`memory`** - in-process adapter
//! - **`offline`** - adapter used when the store cannot be opened
//!
//! # Module Structure
//!
//! ```text
//! database/
//! ├── mod.rs      - Module exports and documentation
//! ├── record.rs   - Record types, filters, pagination
//! ├── adapter.rs  - RecordStore trait and StoreError
//! ├── dal.rs      - Data access layer
//! ├── indexes.rs  - Index declarations
//! ├── sqlite.rs   - SQLite adapter
//! ├── memory.rs   - In-memory adapter
//! └── offline.rs  - Unavailable-store adapter
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use crm_hrms::backend::database::{Dal, Filter, MemoryStore, Page};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dal = Dal::with_store(MemoryStore::new());
//! let doc = json!({"name": "Acme", "status": "active"}).as_object().cloned().unwrap();
//! let id = dal.insert("customers", doc).await?;
//! let active = dal
//!     .find_many("customers", &Filter::new().eq("status", "active"), Page::default())
//!     .await;
//! assert_eq!(active[0].id, id);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod dal;
pub mod indexes;
pub mod memory;
pub mod offline;
pub mod record;
pub mod sqlite;

pub use adapter::{IndexSpec, RecordStore, StoreError, StoredRecord};
pub use dal::{Dal, DalError};
pub use indexes::DATABASE_INDEXES;
pub use memory::MemoryStore;
pub use offline::OfflineStore;
pub use record::{Document, Filter, Page, Record, DEFAULT_LIMIT, MAX_LIMIT};
pub use sqlite::SqliteStore;
