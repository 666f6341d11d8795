//! Keepsake Core - Identity Types and Item Contract
//!
//! Pure data types for the keepsake revision cache. The store and cache
//! layers live in keepsake-store; this crate contains only identifiers,
//! the item contract, the expiration policy, and the error taxonomy.

pub mod error;
pub mod expiration;
pub mod identity;
pub mod item;

pub use error::{
    ExpirationError, ReserveError, ReserveResult, SnapshotError, StoreError, StoreResult,
};
pub use expiration::Expiration;
pub use identity::{InstanceId, RevisionId, Timestamp};
pub use item::Versioned;
