//! In-memory key/value store backend.

use crate::store::{EntryMetadata, KeyValueStore};
use chrono::Utc;
use keepsake_core::{Expiration, StoreError, StoreResult, Timestamp};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    expiration: Expiration,
    created_at: Timestamp,
    last_access: Timestamp,
}

impl<T> Entry<T> {
    fn new(value: T, expiration: Expiration, now: Timestamp) -> Self {
        Self {
            value,
            expiration,
            created_at: now,
            last_access: now,
        }
    }

    fn is_expired(&self, now: Timestamp) -> bool {
        match self.expiration {
            Expiration::None => false,
            Expiration::Sliding(timeout) => {
                let timeout =
                    chrono::Duration::from_std(timeout).unwrap_or(chrono::Duration::MAX);
                now - self.last_access > timeout
            }
            Expiration::Absolute(deadline) => now >= deadline,
        }
    }

    fn metadata(&self) -> EntryMetadata {
        EntryMetadata {
            expiration: self.expiration,
            created_at: self.created_at,
            last_access: self.last_access,
        }
    }
}

/// In-memory [`KeyValueStore`] over a locked hash map.
///
/// Expired entries are dropped lazily when touched; [`purge_expired`]
/// sweeps them eagerly for callers that want to reclaim memory. There is
/// no background sweeper.
///
/// [`purge_expired`]: MemoryStore::purge_expired
#[derive(Debug)]
pub struct MemoryStore<T> {
    entries: RwLock<HashMap<String, Entry<T>>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone + Send + Sync> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    pub fn len(&self) -> StoreResult<usize> {
        let now = Utc::now();
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.values().filter(|e| !e.is_expired(now)).count())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Drop all entries.
    pub fn clear(&self) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        entries.clear();
        Ok(())
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn purge_expired(&self) -> StoreResult<usize> {
        let now = Utc::now();
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        Ok(before - entries.len())
    }
}

impl<T: Clone + Send + Sync> KeyValueStore<T> for MemoryStore<T> {
    fn get(&self, key: &str) -> StoreResult<Option<T>> {
        let now = Utc::now();
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
            return Ok(None);
        }
        if let Some(entry) = entries.get_mut(key) {
            entry.last_access = now;
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    fn metadata(&self, key: &str) -> StoreResult<Option<EntryMetadata>> {
        let now = Utc::now();
        let entries = self.entries.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(Entry::metadata))
    }

    fn add(&self, key: &str, value: T, expiration: Expiration) -> StoreResult<()> {
        let now = Utc::now();
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        if entries.get(key).is_some_and(|e| !e.is_expired(now)) {
            return Err(StoreError::AlreadyExists {
                key: key.to_string(),
            });
        }
        // An expired entry under the same key is simply replaced.
        entries.insert(key.to_string(), Entry::new(value, expiration, now));
        Ok(())
    }

    fn update(&self, key: &str, value: T) -> StoreResult<bool> {
        let now = Utc::now();
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
            return Ok(false);
        }
        match entries.get_mut(key) {
            Some(entry) => {
                entry.value = value;
                entry.last_access = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn upsert(
        &self,
        key: &str,
        seed: T,
        expiration: Expiration,
        apply: &mut dyn FnMut(&mut T),
    ) -> StoreResult<()> {
        let now = Utc::now();
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        // A dead entry must not be mutated back to life.
        if entries.get(key).is_some_and(|e| e.is_expired(now)) {
            entries.remove(key);
        }
        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(seed, expiration, now));
        apply(&mut entry.value);
        entry.last_access = now;
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut entries = self.entries.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(entries.remove(key).is_some())
    }
}
