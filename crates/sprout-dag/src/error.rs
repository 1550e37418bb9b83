//! Error types for the commit graph.

use sprout_types::{CommitId, ErrorKind};

/// Errors that can occur during graph operations.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// A referenced commit was not found in the graph.
    #[error("commit not found: {0}")]
    CommitNotFound(CommitId),

    /// A parent reference points to a commit that does not exist.
    #[error("dangling parent reference: commit {commit} references missing parent {parent}")]
    DanglingParent {
        /// The commit containing the bad reference.
        commit: CommitId,
        /// The missing parent.
        parent: CommitId,
    },

    /// Attempted to append a commit with an id that already exists.
    #[error("duplicate commit: {0}")]
    DuplicateCommit(CommitId),
}

impl DagError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CommitNotFound(_) => ErrorKind::RefNotFound,
            Self::DanglingParent { .. } | Self::DuplicateCommit(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience alias for graph results.
pub type DagResult<T> = Result<T, DagError>;
