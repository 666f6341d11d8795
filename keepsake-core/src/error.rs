//! Error types for store and reserve operations.

use crate::identity::{InstanceId, Timestamp};
use thiserror::Error;

/// Invalid expiration policy values, rejected before any store mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpirationError {
    #[error("sliding timeout must be non-zero")]
    ZeroSlidingTimeout,

    #[error("absolute deadline {deadline} is not in the future")]
    DeadlineNotInFuture { deadline: Timestamp },
}

/// Key/value store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Invalid expiration for key {key}: {source}")]
    InvalidExpiration {
        key: String,
        source: ExpirationError,
    },

    #[error("Add failed for key {key}: already exists")]
    AlreadyExists { key: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Reported by an item that cannot produce a value copy of itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("snapshot of instance {instance} failed: {reason}")]
pub struct SnapshotError {
    pub instance: InstanceId,
    pub reason: String,
}

/// Reserve layer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReserveError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The current value was written but the revision append did not
    /// happen, so history is one entry behind for this instance.
    #[error("Current value for {instance} updated but revision not recorded: {source}")]
    RevisionNotRecorded {
        instance: InstanceId,
        source: SnapshotError,
    },
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for reserve operations.
pub type ReserveResult<T> = Result<T, ReserveError>;
