//! Orchestrates the current-value cache and the revision history.

use crate::cacher::Cacher;
use crate::revisions::Revisions;
use crate::store::KeyValueStore;
use keepsake_core::{Expiration, InstanceId, ReserveError, ReserveResult, Versioned};
use std::sync::Arc;

/// Revision-tracking cache for a single item type.
///
/// A reserve keeps the latest value per instance and a full timeline of
/// snapshots beside it. One reserve per type, built explicitly by the
/// caller and typically shared behind an `Arc`; every method takes `&self`
/// and is safe for concurrent callers.
///
/// Inserting writes the current value first and the history snapshot
/// second. The pair is not transactional: a reader between the two steps
/// can see a current value whose timeline is one entry behind, and a
/// failed snapshot leaves exactly that state (reported as
/// [`ReserveError::RevisionNotRecorded`]).
pub struct Reserve<T: Versioned> {
    current: Cacher<T>,
    history: Revisions<T>,
}

impl<T: Versioned> Reserve<T> {
    /// Reserve over fresh in-memory stores.
    pub fn new() -> Self {
        Self {
            current: Cacher::new(),
            history: Revisions::new(),
        }
    }

    /// Reserve over caller-provided backends.
    pub fn with_stores(
        current: Arc<dyn KeyValueStore<T>>,
        history: Arc<dyn KeyValueStore<Vec<T>>>,
    ) -> Self {
        Self {
            current: Cacher::with_store(current),
            history: Revisions::with_store(history),
        }
    }

    /// Latest value for `id`. History is not consulted.
    pub fn fetch(&self, id: InstanceId) -> ReserveResult<Option<T>> {
        Ok(self.current.fetch(id)?)
    }

    /// Raw-key form of [`fetch`](Reserve::fetch).
    pub fn fetch_key(&self, key: &str) -> ReserveResult<Option<T>> {
        Ok(self.current.fetch_key(key)?)
    }

    /// Store `value` as the current value of its instance and record a
    /// snapshot of it in the history.
    pub fn insert(&self, value: &T) -> ReserveResult<()> {
        self.insert_with(value, Expiration::None)
    }

    /// Like [`insert`](Reserve::insert), with an expiration hint for the
    /// current-value entry. History entries never expire.
    ///
    /// An invalid expiration fails before anything is written. A snapshot
    /// failure is reported after the current value has already been
    /// updated; the history is left one entry behind.
    pub fn insert_with(&self, value: &T, expiration: Expiration) -> ReserveResult<()> {
        let instance = value.instance_id();
        self.current.insert_with(instance, value.clone(), expiration)?;

        let snapshot = value.snapshot().map_err(|source| {
            tracing::warn!(
                instance = %instance,
                "current value updated but revision not recorded: {source}"
            );
            ReserveError::RevisionNotRecorded { instance, source }
        })?;
        self.history.insert(snapshot)?;
        tracing::debug!(instance = %instance, "recorded revision");
        Ok(())
    }

    /// Every revision of `id` seen so far, most recent first.
    pub fn revisions(&self, id: InstanceId) -> ReserveResult<Vec<T>> {
        Ok(self.history.fetch_all(id)?)
    }
}

impl<T: Versioned> Default for Reserve<T> {
    fn default() -> Self {
        Self::new()
    }
}
