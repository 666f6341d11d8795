//! Append-only revision history, one timeline per instance.

use crate::memory::MemoryStore;
use crate::store::KeyValueStore;
use keepsake_core::{Expiration, InstanceId, StoreResult, Versioned};
use std::sync::Arc;

/// Per-instance snapshot log.
///
/// Each instance id maps to an ordered sequence of snapshots; the sequence
/// only ever grows. Timelines of different instances never touch.
pub struct Revisions<T: Versioned> {
    log: Arc<dyn KeyValueStore<Vec<T>>>,
}

impl<T: Versioned> Revisions<T> {
    /// History over a fresh in-memory store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// History over a caller-provided backend.
    pub fn with_store(log: Arc<dyn KeyValueStore<Vec<T>>>) -> Self {
        Self { log }
    }

    /// Every recorded revision of `id`, most recent first.
    ///
    /// Unknown instances yield an empty vec, not an error. The result is an
    /// owned snapshot of the timeline at call time.
    pub fn fetch_all(&self, id: InstanceId) -> StoreResult<Vec<T>> {
        Ok(self.log.get(&id.canonical())?.unwrap_or_default())
    }

    /// Record `value` in the timeline of its instance.
    ///
    /// The newest entry sits at index 0, so retrieval needs no reversal.
    /// The append mutates the stored sequence inside the store's atomic
    /// upsert: concurrent inserts for one instance serialize there, and
    /// none of them can drop another's entry. History entries never expire.
    pub fn insert(&self, value: T) -> StoreResult<()> {
        let key = value.instance_id().canonical();
        let mut value = Some(value);
        self.log.upsert(&key, Vec::new(), Expiration::None, &mut |seq| {
            if let Some(v) = value.take() {
                seq.insert(0, v);
            }
        })
    }
}

impl<T: Versioned> Default for Revisions<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Toy;

    #[test]
    fn test_unknown_instance_yields_empty_sequence() {
        let revisions: Revisions<Toy> = Revisions::new();
        assert_eq!(revisions.fetch_all(InstanceId::new()).unwrap().len(), 0);
    }

    #[test]
    fn test_inserts_grow_history_by_one() {
        let revisions = Revisions::new();
        let instance = InstanceId::new();
        for n in 1..=5 {
            revisions
                .insert(Toy::with_instance(instance, &format!("rev-{n}")))
                .unwrap();
            assert_eq!(revisions.fetch_all(instance).unwrap().len(), n);
        }
    }

    #[test]
    fn test_most_recent_revision_comes_first() {
        let revisions = Revisions::new();
        let instance = InstanceId::new();
        revisions.insert(Toy::with_instance(instance, "Bob")).unwrap();
        revisions.insert(Toy::with_instance(instance, "Phil")).unwrap();

        let stored = revisions.fetch_all(instance).unwrap();
        assert_eq!(stored[0].name, "Phil");
        assert_eq!(stored[1].name, "Bob");
    }

    #[test]
    fn test_timelines_of_distinct_instances_stay_apart() {
        let revisions = Revisions::new();
        let first = InstanceId::new();
        let second = InstanceId::new();
        revisions.insert(Toy::with_instance(first, "Bob")).unwrap();
        revisions.insert(Toy::with_instance(second, "George")).unwrap();
        revisions.insert(Toy::with_instance(first, "Robert")).unwrap();

        let first_log = revisions.fetch_all(first).unwrap();
        let second_log = revisions.fetch_all(second).unwrap();
        assert_eq!(first_log.len(), 2);
        assert_eq!(second_log.len(), 1);
        assert_eq!(first_log[0].name, "Robert");
        assert_eq!(second_log[0].name, "George");
    }

    #[test]
    fn test_concurrent_inserts_lose_nothing() {
        let revisions: Arc<Revisions<Toy>> = Arc::new(Revisions::new());
        let instance = InstanceId::new();
        let mut handles = Vec::new();
        for i in 0..16 {
            let revisions = Arc::clone(&revisions);
            handles.push(std::thread::spawn(move || {
                revisions
                    .insert(Toy::with_instance(instance, &format!("rev-{i}")))
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(revisions.fetch_all(instance).unwrap().len(), 16);
    }
}
