/**
 * Store Adapter Contract
 *
 * `RecordStore` is the seam between the data-access layer and a concrete
 * storage engine. Adapters work with native `Uuid` identifiers and raw
 * documents; ID parsing, timestamp stamping, pagination defaults and the
 * read-degradation policy all live in `Dal`, above this trait.
 *
 * Adapters must:
 * - return records in insertion order from `find`
 * - enforce every unique `IndexSpec` passed to `ensure_index`, reporting a
 *   violation as `StoreError::DuplicateKey`
 * - skip uniqueness for records where any indexed field is missing or null
 * - report connectivity problems as `StoreError::Unavailable`
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use super::record::{Document, Filter};

/// A record in the adapter's native form
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: Uuid,
    pub fields: Document,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Index declaration over one or more top-level fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSpec {
    pub collection: &'static str,
    pub fields: &'static [&'static str],
    pub unique: bool,
}

impl IndexSpec {
    pub const fn unique(collection: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            collection,
            fields,
            unique: true,
        }
    }

    pub const fn non_unique(collection: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            collection,
            fields,
            unique: false,
        }
    }

    /// Stable name, e.g. `ux_attendance_employee_id_date`
    pub fn name(&self) -> String {
        let prefix = if self.unique { "ux" } else { "ix" };
        format!("{}_{}_{}", prefix, self.collection, self.fields.join("_"))
    }

    /// Key tuple for a document, or `None` when a field is missing or null
    pub fn key_of(&self, doc: &Document) -> Option<Vec<serde_json::Value>> {
        self.fields
            .iter()
            .map(|field| doc.get(*field).filter(|v| !v.is_null()).cloned())
            .collect()
    }
}

/// Errors reported by store adapters
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    /// A unique index rejected the write
    #[error("duplicate key in {collection} ({index})")]
    DuplicateKey { collection: String, index: String },

    /// The store could not be reached or did not answer in time
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A stored row could not be decoded
    #[error("corrupt record {id} in {collection}: {reason}")]
    Corrupt {
        collection: String,
        id: String,
        reason: String,
    },

    /// The request itself was unusable (bad index or field name)
    #[error("invalid store request: {0}")]
    InvalidRequest(String),
}

/// Storage engine behind the data-access layer
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug {
    /// Short engine name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Round-trip check used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;

    /// Create an index if it does not exist yet
    async fn ensure_index(&self, index: &IndexSpec) -> Result<(), StoreError>;

    async fn insert(&self, collection: &str, record: StoredRecord) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<StoredRecord>, StoreError>;

    /// Matching records in insertion order, after skipping `skip` and taking at most `limit`
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<StoredRecord>, StoreError>;

    /// Overwrite the given fields; `Ok(false)` when no record has this id
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: &Document,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError>;

    /// `Ok(false)` when no record has this id
    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;
}
