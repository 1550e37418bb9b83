//! Working tree model for Sprout.
//!
//! The tree is a map of [`Entry`] values keyed by [`EntryId`]. Membership is
//! owned by each directory's child list; paths are always re-derived from the
//! parent chain, never edited in place.
//!
//! # Key Types
//!
//! - [`EntryTree`] -- The tree itself and every mutation on it
//! - [`Entry`] -- Sum type over [`DirectoryEntry`] and [`FileEntry`]
//! - [`FileFlags`] -- tracked / dirty / deleted / hidden bookkeeping
//! - [`DeleteReport`] -- Which ids a delete removed or tombstoned
//!
//! [`EntryId`]: sprout_types::EntryId

pub mod entry;
pub mod error;
pub mod path;
pub mod tree;

pub use entry::{DirectoryEntry, Entry, EntryKind, FileEntry, FileFlags};
pub use error::{TreeError, TreeResult};
pub use tree::{DeleteReport, EntryTree};
