//! Snapshot storage for Sprout.
//!
//! A [`Snapshot`] is the committed state of the working tree: an immutable
//! map from baseline path to file content. Paths are the keys; there is no
//! content hashing. Snapshots are shared behind an `Arc` and new ones are
//! always derived copy-on-write, so a snapshot attached to a commit can never
//! change.
//!
//! # Design Rules
//!
//! 1. Snapshots are immutable once built.
//! 2. Each commit id maps to exactly one snapshot, written once.
//! 3. Nothing is ever deleted from the store.

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use snapshot::Snapshot;
pub use store::SnapshotStore;
