use serde::{Deserialize, Serialize};

use sprout_types::{CommitId, Timestamp};

/// A commit record.
///
/// The id is generated, not derived from content. `parents` is empty for a
/// root commit and holds exactly one id otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: CommitId,
    pub message: String,
    pub parents: Vec<CommitId>,
    pub author: String,
    pub timestamp: Timestamp,
}

impl Commit {
    pub fn new(
        id: CommitId,
        message: impl Into<String>,
        parent: Option<CommitId>,
        author: impl Into<String>,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            message: message.into(),
            parents: parent.into_iter().collect(),
            author: author.into(),
            timestamp,
        }
    }

    /// First parent, if any.
    pub fn parent(&self) -> Option<&CommitId> {
        self.parents.first()
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}
