use serde::{Deserialize, Serialize};
use sprout_types::CommitId;

/// A ref moved by a sync operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefUpdate {
    pub name: String,
    pub old: Option<CommitId>,
    pub new: CommitId,
}

impl RefUpdate {
    pub fn is_noop(&self) -> bool {
        self.old.as_ref() == Some(&self.new)
    }

    /// `old..new`, or `[new branch]` when the ref did not exist.
    pub fn range(&self) -> String {
        match &self.old {
            Some(old) => format!("{old}..{}", self.new),
            None => "[new branch]".to_string(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PushResult {
    pub remote: String,
    pub branch: String,
    pub commits_sent: Vec<CommitId>,
    pub update: RefUpdate,
}

impl PushResult {
    pub fn is_up_to_date(&self) -> bool {
        self.commits_sent.is_empty() && self.update.is_noop()
    }
}

#[derive(Clone, Debug, Default)]
pub struct FetchResult {
    pub remote: String,
    pub commits_received: Vec<CommitId>,
    /// Tracking refs created or moved.
    pub refs_updated: Vec<RefUpdate>,
}

impl FetchResult {
    pub fn is_up_to_date(&self) -> bool {
        self.commits_received.is_empty() && self.refs_updated.is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct PullResult {
    pub fetch: FetchResult,
    pub branch: String,
    pub update: RefUpdate,
    pub merge_status: MergeStatus,
    /// HEAD was on another branch, or detached, before the pull.
    pub switched_branch: bool,
}

/// How a pull moved the local branch. Merges are never attempted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MergeStatus {
    #[default]
    UpToDate,
    /// The old local tip is an ancestor of the remote tip.
    FastForward,
    /// Local history diverged and the branch pointer was overwritten.
    Overwritten,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_update_range() {
        let new = RefUpdate {
            name: "main".into(),
            old: None,
            new: CommitId::from_raw("bbbbbbb"),
        };
        assert_eq!(new.range(), "[new branch]");
        assert!(!new.is_noop());

        let moved = RefUpdate {
            old: Some(CommitId::from_raw("aaaaaaa")),
            ..new
        };
        assert_eq!(moved.range(), "aaaaaaa..bbbbbbb");
    }

    #[test]
    fn fetch_result_defaults_up_to_date() {
        assert!(FetchResult::default().is_up_to_date());
        assert_eq!(MergeStatus::default(), MergeStatus::UpToDate);
    }
}
