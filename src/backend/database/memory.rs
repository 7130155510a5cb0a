/**
 * In-Memory Store
 *
 * A `RecordStore` held entirely in process memory. Used for tests and for
 * `DATABASE_URL=memory` development runs. Records are kept per collection in
 * insertion order behind a single `RwLock`, so every operation is atomic with
 * respect to the others.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::adapter::{IndexSpec, RecordStore, StoreError, StoredRecord};
use super::record::{Document, Filter};

#[derive(Debug, Default)]
struct CollectionData {
    records: Vec<StoredRecord>,
    unique_indexes: Vec<IndexSpec>,
}

impl CollectionData {
    /// First unique index that `doc` would violate, ignoring the record `own_id`
    fn conflicting_index(&self, doc: &Document, own_id: Option<Uuid>) -> Option<&IndexSpec> {
        self.unique_indexes.iter().find(|index| {
            let Some(key) = index.key_of(doc) else {
                return false;
            };
            self.records
                .iter()
                .filter(|r| Some(r.id) != own_id)
                .any(|r| index.key_of(&r.fields).as_ref() == Some(&key))
        })
    }
}

/// Process-local record store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, CollectionData>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(collection: &str, index: &IndexSpec) -> StoreError {
    StoreError::DuplicateKey {
        collection: collection.to_string(),
        index: index.name(),
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn ensure_index(&self, index: &IndexSpec) -> Result<(), StoreError> {
        if !index.unique {
            return Ok(());
        }

        let mut collections = self.collections.write().await;
        let data = collections.entry(index.collection.to_string()).or_default();
        if data.unique_indexes.contains(index) {
            return Ok(());
        }

        let mut seen = Vec::new();
        for record in &data.records {
            if let Some(key) = index.key_of(&record.fields) {
                if seen.contains(&key) {
                    return Err(duplicate(index.collection, index));
                }
                seen.push(key);
            }
        }

        data.unique_indexes.push(*index);
        Ok(())
    }

    async fn insert(&self, collection: &str, record: StoredRecord) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let data = collections.entry(collection.to_string()).or_default();

        if let Some(index) = data.conflicting_index(&record.fields, None) {
            return Err(duplicate(collection, index));
        }

        data.records.push(record);
        Ok(())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<StoredRecord>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|data| data.records.iter().find(|r| r.id == id))
            .cloned())
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let collections = self.collections.read().await;
        let Some(data) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        Ok(data
            .records
            .iter()
            .filter(|r| filter.matches(&r.fields))
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        changes: &Document,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(data) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(position) = data.records.iter().position(|r| r.id == id) else {
            return Ok(false);
        };

        let mut merged = data.records[position].fields.clone();
        for (key, value) in changes {
            merged.insert(key.clone(), value.clone());
        }

        if let Some(index) = data.conflicting_index(&merged, Some(id)) {
            return Err(duplicate(collection, index));
        }

        let record = &mut data.records[position];
        record.fields = merged;
        record.updated_at = updated_at;
        Ok(true)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> Result<bool, StoreError> {
        let mut collections = self.collections.write().await;
        let Some(data) = collections.get_mut(collection) else {
            return Ok(false);
        };

        let before = data.records.len();
        data.records.retain(|r| r.id != id);
        Ok(data.records.len() != before)
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|data| data.records.iter().filter(|r| filter.matches(&r.fields)).count() as u64)
            .unwrap_or(0))
    }
}
