//! Commits and their snapshots, kept side by side.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_dag::{Commit, CommitGraph};
use sprout_store::{Snapshot, SnapshotStore, StoreError};
use sprout_types::CommitId;

use crate::error::SyncResult;
use crate::negotiation::NegotiationEngine;

/// A commit graph plus the snapshot of every commit in it.
///
/// Every commit in `commits` has a snapshot in `snapshots`, and vice versa.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    pub commits: CommitGraph,
    pub snapshots: SnapshotStore,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new commit and its snapshot. Nothing is written on error.
    pub fn record(&mut self, commit: Commit, snapshot: Snapshot) -> SyncResult<()> {
        if self.snapshots.contains(&commit.id) {
            return Err(StoreError::DuplicateSnapshot(commit.id).into());
        }
        let id = commit.id.clone();
        self.commits.append(commit)?;
        self.snapshots.insert(id, snapshot)?;
        Ok(())
    }

    pub fn snapshot(&self, id: &CommitId) -> Option<&Snapshot> {
        self.snapshots.get(id)
    }

    pub fn commit(&self, id: &CommitId) -> Option<&Commit> {
        self.commits.get(id)
    }

    pub fn contains(&self, id: &CommitId) -> bool {
        self.commits.contains(id)
    }

    /// Copy every commit `self` has and `target` lacks, in creation order,
    /// with snapshots. Returns the ids copied.
    pub fn copy_missing_to(&self, target: &mut History) -> SyncResult<Vec<CommitId>> {
        let wants = NegotiationEngine::compute_wants(&target.commits, &self.commits);
        for id in &wants {
            let snapshot = self.snapshots.require(id)?.clone();
            let commit = match self.commits.get(id) {
                Some(commit) => commit.clone(),
                None => continue,
            };
            target.record(commit, snapshot)?;
        }
        debug!(copied = wants.len(), "history copied");
        Ok(wants)
    }
}
