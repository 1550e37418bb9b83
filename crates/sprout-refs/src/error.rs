//! Error types for reference operations.

use sprout_types::ErrorKind;
use thiserror::Error;

/// Errors that can occur during reference operations.
#[derive(Debug, Error)]
pub enum RefError {
    /// The reference was not found.
    #[error("ref not found: {name}")]
    NotFound { name: String },

    /// A branch with this name already exists.
    #[error("a branch named '{name}' already exists")]
    AlreadyExists { name: String },

    /// Rename target exists and the rename was not forced.
    #[error("a branch named '{name}' already exists")]
    NameCollision { name: String },

    /// The branch or remote name is invalid.
    #[error("'{name}' is not a valid name: {reason}")]
    InvalidName { name: String, reason: String },

    /// Cannot delete the currently checked-out branch without force.
    #[error("cannot delete branch '{name}' checked out at HEAD")]
    DeleteCurrentBranch { name: String },

    /// The branch points somewhere other than HEAD and deletion was not forced.
    #[error("the branch '{name}' is not fully merged")]
    NotFullyMerged { name: String },

    /// An abbreviated commit id matched more than one commit.
    #[error("short commit id {prefix} is ambiguous")]
    AmbiguousRevision { prefix: String },

    /// The revision expression could not be parsed.
    #[error("invalid revision: {0}")]
    InvalidRevision(String),
}

impl RefError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. }
            | Self::AmbiguousRevision { .. }
            | Self::InvalidRevision(_) => ErrorKind::RefNotFound,
            Self::AlreadyExists { .. } => ErrorKind::BranchExists,
            Self::NameCollision { .. } => ErrorKind::NameCollision,
            Self::InvalidName { .. } => ErrorKind::InvalidName,
            Self::DeleteCurrentBranch { .. } => ErrorKind::CheckedOutBranch,
            Self::NotFullyMerged { .. } => ErrorKind::NotFullyMerged,
        }
    }
}

/// Convenience type alias for ref operations.
pub type Result<T> = std::result::Result<T, RefError>;
