/**
 * Offline Store
 *
 * Stand-in adapter used when the configured store could not be opened at
 * startup. Every operation reports `StoreError::Unavailable`, so reads
 * degrade to empty results and writes fail with 503 instead of the server
 * refusing to start.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::adapter::{IndexSpec, RecordStore, StoreError, StoredRecord};
use super::record::{Document, Filter};

#[derive(Debug, Clone)]
pub struct OfflineStore {
    reason: String,
}

impl OfflineStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn unavailable(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

#[async_trait]
impl RecordStore for OfflineStore {
    fn backend_name(&self) -> &'static str {
        "offline"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.unavailable())
    }

    async fn ensure_index(&self, _index: &IndexSpec) -> Result<(), StoreError> {
        Err(self.unavailable())
    }

    async fn insert(&self, _collection: &str, _record: StoredRecord) -> Result<(), StoreError> {
        Err(self.unavailable())
    }

    async fn get(&self, _collection: &str, _id: Uuid) -> Result<Option<StoredRecord>, StoreError> {
        Err(self.unavailable())
    }

    async fn find(
        &self,
        _collection: &str,
        _filter: &Filter,
        _skip: u64,
        _limit: u64,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        Err(self.unavailable())
    }

    async fn update(
        &self,
        _collection: &str,
        _id: Uuid,
        _changes: &Document,
        _updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        Err(self.unavailable())
    }

    async fn delete(&self, _collection: &str, _id: Uuid) -> Result<bool, StoreError> {
        Err(self.unavailable())
    }

    async fn count(&self, _collection: &str, _filter: &Filter) -> Result<u64, StoreError> {
        Err(self.unavailable())
    }
}
