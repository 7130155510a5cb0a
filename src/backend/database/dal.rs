/**
 * Data Access Layer
 *
 * `Dal` is the single persistence contract every handler and service uses.
 * It wraps whichever `RecordStore` adapter was chosen at startup and owns
 * the behaviour that must not vary between engines:
 *
 * - identifiers are opaque strings outside, `Uuid` inside; an unparsable id
 *   is simply "not found"
 * - `id`, `created_at` and `updated_at` are assigned here, never by callers
 * - `find_many` defaults to 100 records and never returns more than 1000
 * - reads degrade to empty/zero when the store is unavailable, writes fail
 *
 * # Thread Safety
 *
 * `Dal` is a cheap `Clone` around an `Arc`, shared by every request.
 */

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::adapter::{IndexSpec, RecordStore, StoreError, StoredRecord};
use super::record::{strip_reserved, to_document, Document, Filter, Page, Record};

/// Errors surfaced by DAL write operations
#[derive(Debug, Error)]
pub enum DalError {
    /// A declared unique index rejected the write
    #[error("duplicate key in {collection} ({index})")]
    DuplicateKey { collection: String, index: String },

    /// The backing store could not be reached
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The record could not be converted to a document
    #[error("record is not a JSON object: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed request reached the adapter (bad field or index name)
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl From<StoreError> for DalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey { collection, index } => Self::DuplicateKey { collection, index },
            StoreError::Unavailable(reason) => Self::StoreUnavailable(reason),
            StoreError::Corrupt { .. } => Self::StoreUnavailable(err.to_string()),
            StoreError::InvalidRequest(reason) => Self::InvalidRequest(reason),
        }
    }
}

/// Generic persistence over named collections
#[derive(Debug, Clone)]
pub struct Dal {
    store: Arc<dyn RecordStore>,
}

impl Dal {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Wrap a concrete adapter
    pub fn with_store<S: RecordStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Whether the store answers right now
    pub async fn is_connected(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Store ping failed: {}", e);
                false
            }
        }
    }

    /// Apply index declarations, stopping at the first failure
    pub async fn declare_indexes(&self, indexes: &[IndexSpec]) -> Result<(), DalError> {
        for index in indexes {
            self.store.ensure_index(index).await.map_err(|e| {
                tracing::error!("Failed to create index {}: {}", index.name(), e);
                DalError::from(e)
            })?;
        }
        tracing::info!("Declared {} indexes", indexes.len());
        Ok(())
    }

    /// Store a new record and return its identifier
    ///
    /// Any caller-supplied `id`, `created_at` or `updated_at` is discarded.
    ///
    /// # Errors
    /// * `DuplicateKey` - a unique index rejected the record
    /// * `StoreUnavailable` - the store could not be reached
    pub async fn insert(&self, collection: &str, mut record: Document) -> Result<String, DalError> {
        strip_reserved(&mut record);
        let now = Utc::now();
        let id = Uuid::new_v4();

        self.store
            .insert(
                collection,
                StoredRecord {
                    id,
                    fields: record,
                    created_at: now,
                    updated_at: now,
                },
            )
            .await
            .map_err(|e| log_write_error("insert", collection, e))?;

        tracing::debug!("Inserted {} into {}", id, collection);
        Ok(id.to_string())
    }

    /// Serialize and insert a typed value
    pub async fn insert_entity<T: Serialize>(
        &self,
        collection: &str,
        value: &T,
    ) -> Result<String, DalError> {
        self.insert(collection, to_document(value)?).await
    }

    /// Fetch one record by identifier
    ///
    /// Malformed ids, missing records and store failures all yield `None`.
    pub async fn get_by_id(&self, collection: &str, id: &str) -> Option<Record> {
        let native = parse_id(id)?;
        match self.store.get(collection, native).await {
            Ok(found) => found.map(into_record),
            Err(e) => {
                tracing::warn!("get_by_id on {} degraded to not found: {}", collection, e);
                None
            }
        }
    }

    /// First record matching `filter` in insertion order
    pub async fn find_one(&self, collection: &str, filter: &Filter) -> Option<Record> {
        self.find_many(collection, filter, Page::new(Some(0), Some(1)))
            .await
            .into_iter()
            .next()
    }

    /// Matching records: filter, then skip, then limit
    ///
    /// Returns an empty list when the filter is malformed or the store is
    /// unavailable.
    pub async fn find_many(&self, collection: &str, filter: &Filter, page: Page) -> Vec<Record> {
        if !filter.is_well_formed() {
            tracing::warn!("Rejected malformed filter on {}: {:?}", collection, filter);
            return Vec::new();
        }

        let page = Page::new(Some(page.skip), Some(page.limit));
        match self.store.find(collection, filter, page.skip, page.limit).await {
            Ok(records) => records.into_iter().map(into_record).collect(),
            Err(e) => {
                tracing::warn!("find_many on {} degraded to empty: {}", collection, e);
                Vec::new()
            }
        }
    }

    /// Overwrite the supplied fields of one record
    ///
    /// Reserved keys in `changes` are ignored. `updated_at` is always stamped.
    ///
    /// # Returns
    /// `false` when the id is malformed or matches nothing; no mutation happens
    /// in that case.
    pub async fn update_by_id(
        &self,
        collection: &str,
        id: &str,
        mut changes: Document,
    ) -> Result<bool, DalError> {
        let Some(native) = parse_id(id) else {
            return Ok(false);
        };
        strip_reserved(&mut changes);

        self.store
            .update(collection, native, &changes, Utc::now())
            .await
            .map_err(|e| log_write_error("update", collection, e))
    }

    /// Remove one record; `false` when nothing was deleted
    pub async fn delete_by_id(&self, collection: &str, id: &str) -> Result<bool, DalError> {
        let Some(native) = parse_id(id) else {
            return Ok(false);
        };

        self.store
            .delete(collection, native)
            .await
            .map_err(|e| log_write_error("delete", collection, e))
    }

    /// Number of matching records; zero when the store is unavailable
    pub async fn count(&self, collection: &str, filter: &Filter) -> u64 {
        if !filter.is_well_formed() {
            return 0;
        }

        match self.store.count(collection, filter).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("count on {} degraded to zero: {}", collection, e);
                0
            }
        }
    }

    /// `get_by_id` decoded into a typed entity
    pub async fn get_entity<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Option<T> {
        let record = self.get_by_id(collection, id).await?;
        decode(collection, record)
    }

    /// `find_one` decoded into a typed entity
    pub async fn find_one_entity<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Option<T> {
        let record = self.find_one(collection, filter).await?;
        decode(collection, record)
    }

    /// `find_many` decoded into typed entities; undecodable records are skipped
    pub async fn find_many_entities<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: &Filter,
        page: Page,
    ) -> Vec<T> {
        self.find_many(collection, filter, page)
            .await
            .into_iter()
            .filter_map(|record| decode(collection, record))
            .collect()
    }
}

fn parse_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

fn into_record(stored: StoredRecord) -> Record {
    Record {
        id: stored.id.to_string(),
        fields: stored.fields,
        created_at: stored.created_at,
        updated_at: stored.updated_at,
    }
}

fn decode<T: DeserializeOwned>(collection: &str, record: Record) -> Option<T> {
    let id = record.id.clone();
    record
        .into_entity()
        .map_err(|e| tracing::error!("Record {} in {} does not decode: {}", id, collection, e))
        .ok()
}

fn log_write_error(operation: &str, collection: &str, err: StoreError) -> DalError {
    match &err {
        StoreError::DuplicateKey { index, .. } => {
            tracing::warn!("{} on {} violated {}", operation, collection, index)
        }
        _ => tracing::error!("{} on {} failed: {}", operation, collection, err),
    }
    DalError::from(err)
}
