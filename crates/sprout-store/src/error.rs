use sprout_types::{CommitId, ErrorKind};

/// Errors from snapshot store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No snapshot is associated with this commit.
    #[error("no snapshot for commit {0}")]
    NotFound(CommitId),

    /// A snapshot was already written for this commit.
    #[error("snapshot for commit {0} already exists")]
    DuplicateSnapshot(CommitId),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::RefNotFound,
            Self::DuplicateSnapshot(_) => ErrorKind::Internal,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
