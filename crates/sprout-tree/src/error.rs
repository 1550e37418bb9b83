//! Error types for working tree mutations.

use sprout_types::ErrorKind;

/// Errors that can occur while mutating the working tree.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// The parent is missing, hidden, or not a directory.
    #[error("invalid parent {parent}: {reason}")]
    InvalidParent { parent: String, reason: String },

    /// The entry name was rejected.
    #[error("invalid name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// No visible entry with this id or path.
    #[error("no such entry: {0}")]
    EntryNotFound(String),

    /// A file operation was applied to a directory.
    #[error("not a file: {0}")]
    NotAFile(String),

    /// The root directory cannot be renamed, moved, or deleted.
    #[error("the root directory cannot be modified")]
    RootImmutable,
}

impl TreeError {
    /// User-facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParent { .. } => ErrorKind::InvalidParent,
            Self::InvalidName { .. } | Self::RootImmutable => ErrorKind::InvalidName,
            Self::EntryNotFound(_) => ErrorKind::EntryNotFound,
            Self::NotAFile(_) => ErrorKind::NotAFile,
        }
    }
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
