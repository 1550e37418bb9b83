//! Staging area for Sprout.
//!
//! Tracks which working tree files are selected for the next commit and
//! computes the status report that compares the tree against HEAD.
//!
//! # Key Types
//!
//! - [`StagingArea`] -- Ordered set of staged entry ids
//! - [`WorkdirStatus`] -- Result of status computation
//! - [`FileStatus`] -- Kind of change (New, Modified, Deleted, Renamed)

pub mod error;
pub mod staging;
pub mod status;

pub use error::{IndexError, IndexResult};
pub use staging::StagingArea;
pub use status::{FileStatus, StatusEntry, WorkdirStatus};
