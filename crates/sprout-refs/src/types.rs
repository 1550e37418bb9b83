//! Core reference types.

use std::fmt;

use serde::{Deserialize, Serialize};
use sprout_types::CommitId;

/// The state of HEAD: attached to a branch, or detached at a commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Head {
    /// HEAD follows a branch by name.
    Attached(String),
    /// HEAD points directly at a commit.
    Detached(CommitId),
}

impl Head {
    pub fn branch(&self) -> Option<&str> {
        match self {
            Head::Attached(name) => Some(name),
            Head::Detached(_) => None,
        }
    }

    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Head::Attached(name) => write!(f, "HEAD -> {name}"),
            Head::Detached(id) => write!(f, "HEAD (detached at {id})"),
        }
    }
}

/// Summary information about a branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Branch name.
    pub name: String,
    /// Commit at the branch tip; `None` while unborn.
    pub commit: Option<CommitId>,
    /// Whether HEAD is attached to this branch.
    pub is_current: bool,
}

/// A remote-tracking ref such as `origin/main`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingRef {
    pub remote: String,
    pub branch: String,
    pub commit: CommitId,
}

impl TrackingRef {
    /// `remote/branch`.
    pub fn short_name(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }

    /// `refs/remotes/remote/branch`.
    pub fn canonical_name(&self) -> String {
        format!("refs/remotes/{}/{}", self.remote, self.branch)
    }
}
