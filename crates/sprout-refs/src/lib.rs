//! Reference management for Sprout.
//!
//! References are the human-readable entry points into commit history,
//! analogous to git refs.
//!
//! # Architecture
//!
//! - **Branches** are mutable pointers to commits. A branch created by `init`
//!   is *unborn* (points at nothing) until the first commit.
//! - **Remote-tracking refs** (`origin/main`) mirror branches on a remote and
//!   are only updated by sync operations.
//! - **HEAD** is either attached to a branch name or detached at a commit.
//!   When attached, its commit is always the branch's commit.
//!
//! # Modules
//!
//! - [`error`] - Error types for ref operations
//! - [`types`] - Core ref types: [`Head`], [`BranchInfo`], [`TrackingRef`]
//! - [`names`] - Branch/remote name validation
//! - [`refdb`] - The [`RefDb`] holding branches, HEAD, and tracking refs
//! - [`revision`] - Revision expressions such as `main~2` and `HEAD^`

pub mod error;
pub mod names;
pub mod refdb;
pub mod revision;
pub mod types;

pub use error::{RefError, Result};
pub use names::{validate_branch_name, validate_remote_name};
pub use refdb::RefDb;
pub use revision::Revision;
pub use types::{BranchInfo, Head, TrackingRef};
