//! Error types for the index crate.

use sprout_types::ErrorKind;

/// Errors that can occur during staging operations.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The pathspec matched no visible entry and no pending deletion.
    #[error("pathspec '{0}' did not match any files")]
    PathNotFound(String),
}

impl IndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PathNotFound(_) => ErrorKind::EntryNotFound,
        }
    }
}

/// Convenience alias for index results.
pub type IndexResult<T> = Result<T, IndexError>;
