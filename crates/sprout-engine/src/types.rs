//! Result values returned by engine operations.

use sprout_dag::Commit;
use sprout_refs::Head;
use sprout_types::CommitId;

use crate::materialize::MaterializeReport;

/// Whether `git init` created a repository or found one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created,
    Reinitialized,
}

/// A commit that was just recorded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitSummary {
    pub id: CommitId,
    pub branch: String,
    pub message: String,
    /// Number of staged files the commit consumed.
    pub files: usize,
}

/// Where HEAD ended up after a checkout, switch, or pull.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutOutcome {
    pub head: Head,
    pub commit: Commit,
    /// The branch was created by this operation (`-b` / `-c`).
    pub created: bool,
    pub report: MaterializeReport,
}

/// The commit a hard reset moved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetOutcome {
    pub commit: Commit,
    /// Branch moved by the reset; `None` when HEAD is detached.
    pub branch: Option<String>,
    pub report: MaterializeReport,
}

/// A configured remote as shown by `git remote -v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteInfo {
    pub name: String,
    pub url: String,
}
