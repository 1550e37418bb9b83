//! Commit history for Sprout.
//!
//! Commits are appended once and never removed. Every commit has at most one
//! parent, so each branch lineage is a simple first-parent chain; the graph
//! as a whole is a tree of such chains.

pub mod commit;
pub mod error;
pub mod graph;

pub use commit::Commit;
pub use error::{DagError, DagResult};
pub use graph::CommitGraph;
