//! Test fixtures shared across the store crate.

use chrono::Utc;
use keepsake_core::{InstanceId, RevisionId, SnapshotError, Timestamp, Versioned};

/// Minimal revision-tracked item.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Toy {
    pub id: RevisionId,
    pub instance: InstanceId,
    pub name: String,
    pub stamp: Timestamp,
}

impl Toy {
    pub fn new(name: &str) -> Self {
        Self::with_instance(InstanceId::new(), name)
    }

    pub fn with_instance(instance: InstanceId, name: &str) -> Self {
        Self {
            id: RevisionId::new(),
            instance,
            name: name.to_string(),
            stamp: Utc::now(),
        }
    }
}

impl Versioned for Toy {
    fn revision_id(&self) -> RevisionId {
        self.id
    }

    fn instance_id(&self) -> InstanceId {
        self.instance
    }

    fn stamp(&self) -> Timestamp {
        self.stamp
    }

    fn snapshot(&self) -> Result<Self, SnapshotError> {
        Ok(Self {
            id: RevisionId::new(),
            instance: self.instance,
            name: self.name.clone(),
            stamp: Utc::now(),
        })
    }
}

/// Item whose snapshot always fails, for the partial-write path.
#[derive(Debug, Clone)]
pub(crate) struct FlakyToy {
    pub instance: InstanceId,
    pub name: String,
    stamp: Timestamp,
}

impl FlakyToy {
    pub fn new(name: &str) -> Self {
        Self {
            instance: InstanceId::new(),
            name: name.to_string(),
            stamp: Utc::now(),
        }
    }
}

impl Versioned for FlakyToy {
    fn revision_id(&self) -> RevisionId {
        RevisionId::new()
    }

    fn instance_id(&self) -> InstanceId {
        self.instance
    }

    fn stamp(&self) -> Timestamp {
        self.stamp
    }

    fn snapshot(&self) -> Result<Self, SnapshotError> {
        Err(SnapshotError {
            instance: self.instance,
            reason: format!("payload poisoned for {}", self.name),
        })
    }
}
