//! Key/value store contract consumed by the cache layer.

use keepsake_core::{Expiration, StoreResult, Timestamp};

/// Metadata describing a stored entry without exposing its value.
///
/// Used to distinguish "exists" from "absent" before choosing between add
/// and update, and to inspect the expiration policy an entry was created
/// with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    pub expiration: Expiration,
    pub created_at: Timestamp,
    pub last_access: Timestamp,
}

/// String-keyed store backing the cache layer.
///
/// Implementations must be safe for concurrent callers. [`upsert`] must
/// apply its closure atomically with respect to every other mutation of
/// the same key; the revision log relies on this to keep appends lossless
/// under concurrent writers.
///
/// [`upsert`]: KeyValueStore::upsert
pub trait KeyValueStore<T>: Send + Sync {
    /// Get the value stored under `key`, or `None` if absent or expired.
    ///
    /// Reading an entry with a sliding expiration refreshes its timeout.
    fn get(&self, key: &str) -> StoreResult<Option<T>>;

    /// Metadata for `key`, or `None` if absent or expired.
    ///
    /// Does not refresh a sliding timeout.
    fn metadata(&self, key: &str) -> StoreResult<Option<EntryMetadata>>;

    /// Create a new entry under `key` with the given expiration policy.
    ///
    /// Fails with [`StoreError::AlreadyExists`] if a live entry is present.
    ///
    /// [`StoreError::AlreadyExists`]: keepsake_core::StoreError::AlreadyExists
    fn add(&self, key: &str, value: T, expiration: Expiration) -> StoreResult<()>;

    /// Replace the value of an existing entry, keeping the expiration
    /// policy it was created with. Returns `false` if the key is absent.
    fn update(&self, key: &str, value: T) -> StoreResult<bool>;

    /// Atomic read-modify-write for `key`.
    ///
    /// When the key is absent, an entry is created from `seed` under
    /// `expiration`; the closure then mutates the *stored* value in place.
    /// No other mutation of the same key may interleave.
    fn upsert(
        &self,
        key: &str,
        seed: T,
        expiration: Expiration,
        apply: &mut dyn FnMut(&mut T),
    ) -> StoreResult<()>;

    /// Remove an entry. Returns `false` if the key was absent.
    fn remove(&self, key: &str) -> StoreResult<bool>;
}
