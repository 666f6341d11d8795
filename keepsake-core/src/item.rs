//! Contract for items that can live in a reserve.

use crate::error::SnapshotError;
use crate::identity::{InstanceId, RevisionId, Timestamp};

/// Contract for revision-tracked items.
///
/// Any type stored in a reserve opts in by exposing its identity and a way
/// to produce an independent value copy of itself.
///
/// # Implementation Requirements
///
/// - `instance_id()` must return the same value for every revision of one
///   logical item
/// - `revision_id()` must be unique per snapshot
/// - `snapshot()` must produce a copy that shares no mutable state with
///   `self`, under a fresh revision id and refreshed stamp but the same
///   instance id
pub trait Versioned: Clone + Send + Sync + 'static {
    /// Identifier unique to this specific snapshot.
    fn revision_id(&self) -> RevisionId;

    /// Identifier shared by every revision of the logical item.
    fn instance_id(&self) -> InstanceId;

    /// When this revision was created.
    fn stamp(&self) -> Timestamp;

    /// Produce an independent value copy of the current field values.
    fn snapshot(&self) -> Result<Self, SnapshotError>;
}
