//! In-process `CollectionStore`.
//!
//! # Responsibility
//! - Back tests and demos without a database.
//! - Simulate backend failures (offline, write-protected collections).
//!
//! # Invariants
//! - Iteration order equals insertion order within a collection.
//! - Every trait call is counted, including calls that fail.

use crate::model::record::{Fields, Record, RecordId};
use crate::store::{CollectionStore, StoreError, StoreOperation, StoreResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    collections: BTreeMap<String, Vec<Record>>,
    offline: bool,
    write_protected: BTreeSet<String>,
}

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.offline = offline;
        }
    }

    /// Rejects insert/update/delete on `collection` with `PermissionDenied`.
    pub fn deny_writes(&self, collection: &str) {
        if let Ok(mut state) = self.state.lock() {
            state.write_protected.insert(collection.to_string());
        }
    }

    /// Number of trait calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(
        &self,
        collection: &str,
        operation: StoreOperation,
    ) -> StoreResult<MutexGuard<'_, MemoryState>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self
            .state
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;

        if state.offline {
            return Err(StoreError::Unavailable("memory store is offline".to_string()));
        }
        if operation != StoreOperation::List && state.write_protected.contains(collection) {
            return Err(StoreError::PermissionDenied {
                collection: collection.to_string(),
                operation,
            });
        }
        Ok(state)
    }
}

impl CollectionStore for MemoryStore {
    fn list(&self, collection: &str) -> StoreResult<Vec<Record>> {
        let state = self.enter(collection, StoreOperation::List)?;
        Ok(state
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    fn insert(&self, collection: &str, fields: &Fields) -> StoreResult<RecordId> {
        let mut state = self.enter(collection, StoreOperation::Insert)?;
        let id = RecordId::generate();
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(Record::new(id.clone(), fields.clone()));
        Ok(id)
    }

    fn update(&self, collection: &str, id: &RecordId, fields: &Fields) -> StoreResult<()> {
        let mut state = self.enter(collection, StoreOperation::Update)?;
        let record = state
            .collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|record| &record.id == id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.clone(),
            })?;
        record.merge(fields);
        Ok(())
    }

    fn delete(&self, collection: &str, id: &RecordId) -> StoreResult<bool> {
        let mut state = self.enter(collection, StoreOperation::Delete)?;
        let Some(records) = state.collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|record| &record.id != id);
        Ok(records.len() != before)
    }
}
