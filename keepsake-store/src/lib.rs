//! Keepsake Store - Current-Value Cache and Revision History
//!
//! The store layer for the keepsake revision cache:
//!
//! - [`KeyValueStore`] is the pluggable string-keyed backend contract.
//! - [`MemoryStore`] is the in-process backend.
//! - [`Cacher`] is the typed current-value facade.
//! - [`Revisions`] is the append-only per-instance snapshot log.
//! - [`Reserve`] composes the last two: every insert updates the current
//!   value and records an immutable snapshot in the history.
//!
//! All operations are synchronous and run on the caller's thread; a
//! [`Reserve`] is meant to be shared behind an `Arc`, one per item type.

pub mod cacher;
pub mod memory;
pub mod reserve;
pub mod revisions;
pub mod store;

pub use cacher::Cacher;
pub use memory::MemoryStore;
pub use reserve::Reserve;
pub use revisions::Revisions;
pub use store::{EntryMetadata, KeyValueStore};

#[cfg(test)]
pub(crate) mod fixtures;
