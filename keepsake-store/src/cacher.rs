//! Typed current-value cache over a key/value store.

use crate::memory::MemoryStore;
use crate::store::KeyValueStore;
use chrono::Utc;
use keepsake_core::{Expiration, InstanceId, StoreError, StoreResult};
use std::sync::Arc;

/// Single-slot latest-value cache, one entry per instance.
///
/// A thin typed facade over a [`KeyValueStore`]: instance ids are
/// normalized to their canonical string form at this boundary, and every
/// insert either replaces the existing value in place or creates a new
/// entry. Last writer wins; there is no merge.
pub struct Cacher<T> {
    store: Arc<dyn KeyValueStore<T>>,
}

impl<T: Clone + Send + Sync + 'static> Cacher<T> {
    /// Cache over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Cache over a caller-provided backend.
    pub fn with_store(store: Arc<dyn KeyValueStore<T>>) -> Self {
        Self { store }
    }

    /// Latest value for `id`, or `None` if never inserted or expired.
    pub fn fetch(&self, id: InstanceId) -> StoreResult<Option<T>> {
        self.fetch_key(&id.canonical())
    }

    /// Raw-key form of [`fetch`](Cacher::fetch) for callers holding a
    /// canonical key string.
    pub fn fetch_key(&self, key: &str) -> StoreResult<Option<T>> {
        self.store.get(key)
    }

    /// Insert or overwrite the value for `id`, with no expiration on a
    /// newly created entry.
    pub fn insert(&self, id: InstanceId, value: T) -> StoreResult<()> {
        self.insert_with(id, value, Expiration::None)
    }

    /// Insert or overwrite the value for `id`.
    ///
    /// `expiration` applies only when the entry is created; an existing
    /// entry keeps the policy it was created with. An invalid policy fails
    /// before the store is touched.
    pub fn insert_with(&self, id: InstanceId, value: T, expiration: Expiration) -> StoreResult<()> {
        self.insert_key(&id.canonical(), value, expiration)
    }

    /// Raw-key form of [`insert_with`](Cacher::insert_with).
    pub fn insert_key(&self, key: &str, value: T, expiration: Expiration) -> StoreResult<()> {
        expiration
            .validate(Utc::now())
            .map_err(|source| StoreError::InvalidExpiration {
                key: key.to_string(),
                source,
            })?;

        if self.store.metadata(key)?.is_some() {
            if self.store.update(key, value.clone())? {
                return Ok(());
            }
            // The entry vanished between the probe and the update; fall
            // through and create it.
        }
        match self.store.add(key, value.clone(), expiration) {
            // A concurrent insert created the entry first; overwrite it.
            Err(StoreError::AlreadyExists { .. }) => {
                self.store.update(key, value)?;
                Ok(())
            }
            result => result,
        }
    }

    /// Drop the current value for `id`. Returns `false` if absent.
    pub fn remove(&self, id: InstanceId) -> StoreResult<bool> {
        self.store.remove(&id.canonical())
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Cacher<T> {
    fn default() -> Self {
        Self::new()
    }
}
