use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid commit id: {0:?}")]
    InvalidCommitId(String),

    #[error("invalid entry id: {0:?}")]
    InvalidEntryId(String),
}

/// User-facing classification of every failure the engine can report.
///
/// Each crate keeps its own error enum with precise context; they all map
/// onto one of these kinds so callers can branch on the category without
/// matching every crate's variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A git subcommand was issued before `init`.
    NotARepository,
    /// Unknown branch, revision, or commit.
    RefNotFound,
    /// A branch with the requested name already exists.
    BranchExists,
    /// The operation needs HEAD to point at a commit.
    NoCommitsYet,
    /// Committing is refused while HEAD is detached.
    DetachedHeadCommit,
    /// The commit message is blank.
    EmptyMessage,
    /// The staging area is empty.
    NothingStaged,
    /// Branch delete without force on a branch not at HEAD.
    NotFullyMerged,
    /// Branch rename without force onto an existing name.
    NameCollision,
    /// Deleting the checked-out branch without force.
    CheckedOutBranch,
    /// Tree mutation under a missing or non-directory parent.
    InvalidParent,
    /// Rejected entry, branch, or remote name.
    InvalidName,
    /// No visible entry with the given id or path.
    EntryNotFound,
    /// A file operation was applied to a directory.
    NotAFile,
    /// A remote with the requested name already exists.
    RemoteExists,
    /// Unknown remote.
    RemoteNotFound,
    /// Broken internal invariant (poisoned lock, corrupt state file).
    Internal,
}

impl ErrorKind {
    /// Stable identifier for logs and machine-readable output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotARepository => "not_a_repository",
            Self::RefNotFound => "ref_not_found",
            Self::BranchExists => "branch_exists",
            Self::NoCommitsYet => "no_commits_yet",
            Self::DetachedHeadCommit => "detached_head_commit",
            Self::EmptyMessage => "empty_message",
            Self::NothingStaged => "nothing_staged",
            Self::NotFullyMerged => "not_fully_merged",
            Self::NameCollision => "name_collision",
            Self::CheckedOutBranch => "checked_out_branch",
            Self::InvalidParent => "invalid_parent",
            Self::InvalidName => "invalid_name",
            Self::EntryNotFound => "entry_not_found",
            Self::NotAFile => "not_a_file",
            Self::RemoteExists => "remote_exists",
            Self::RemoteNotFound => "remote_not_found",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_is_snake_case() {
        assert_eq!(ErrorKind::NotFullyMerged.to_string(), "not_fully_merged");
        assert_eq!(ErrorKind::RefNotFound.to_string(), "ref_not_found");
    }

    #[test]
    fn kind_serde_roundtrip() {
        let json = serde_json::to_string(&ErrorKind::DetachedHeadCommit).unwrap();
        let parsed: ErrorKind = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ErrorKind::DetachedHeadCommit);
    }
}
