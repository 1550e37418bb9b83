//! Foundation types for Sprout.
//!
//! Sprout is an in-memory version-control playground: a working tree, a
//! commit history, branches, a staging area, and remotes, all held in plain
//! Rust values. Every other Sprout crate depends on `sprout-types`.
//!
//! # Key Types
//!
//! - [`EntryId`] - Identifier of a node in the working tree
//! - [`CommitId`] - Short generated commit identifier (not a content hash)
//! - [`Timestamp`] - Wall-clock milliseconds used for commits and events
//! - [`ErrorKind`] - Flat, user-facing classification shared by every crate's
//!   error type

pub mod error;
pub mod id;
pub mod temporal;

pub use error::{ErrorKind, TypeError};
pub use id::{CommitId, EntryId};
pub use temporal::Timestamp;
