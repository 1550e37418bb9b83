//! Named remotes and the push/fetch operations against them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sprout_refs::{validate_remote_name, RefDb};

use crate::error::{SyncError, SyncResult};
use crate::history::History;
use crate::remote::Remote;
use crate::types::{FetchResult, PushResult, RefUpdate};

/// All remotes of one repository, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRegistry {
    remotes: BTreeMap<String, Remote>,
}

impl RemoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.remotes.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Remote> {
        self.remotes.get(name)
    }

    fn require(&self, name: &str) -> SyncResult<&Remote> {
        self.remotes
            .get(name)
            .ok_or_else(|| SyncError::RemoteNotFound(name.to_string()))
    }

    /// Remotes sorted by name.
    pub fn list(&self) -> impl Iterator<Item = &Remote> {
        self.remotes.values()
    }

    /// Register an empty remote.
    pub fn add(&mut self, name: &str, url: &str) -> SyncResult<()> {
        validate_remote_name(name)?;
        if self.remotes.contains_key(name) {
            return Err(SyncError::RemoteExists(name.to_string()));
        }
        debug!(remote = name, url, "remote added");
        self.remotes.insert(name.to_string(), Remote::new(name, url));
        Ok(())
    }

    /// Forget a remote. Its tracking refs must be dropped by the caller.
    pub fn remove(&mut self, name: &str) -> SyncResult<Remote> {
        let removed = self
            .remotes
            .remove(name)
            .ok_or_else(|| SyncError::RemoteNotFound(name.to_string()))?;
        debug!(remote = name, "remote removed");
        Ok(removed)
    }

    /// Push `branch` to `remote`.
    ///
    /// Copies every local commit the remote lacks, then points the remote
    /// branch and the local tracking ref at the local tip.
    pub fn push(
        &mut self,
        remote: &str,
        branch: &str,
        local: &History,
        refs: &mut RefDb,
    ) -> SyncResult<PushResult> {
        let target = self
            .remotes
            .get_mut(remote)
            .ok_or_else(|| SyncError::RemoteNotFound(remote.to_string()))?;
        let tip = match refs.branch(branch) {
            None => return Err(SyncError::BranchNotFound(branch.to_string())),
            Some(None) => return Err(SyncError::UnbornBranch(branch.to_string())),
            Some(Some(tip)) => tip.clone(),
        };

        let commits_sent = local.copy_missing_to(&mut target.history)?;
        let old = target.branches.insert(branch.to_string(), tip.clone());
        refs.set_tracking(remote, branch, tip.clone());

        info!(
            remote,
            branch,
            commits = commits_sent.len(),
            tip = %tip,
            "push complete"
        );
        Ok(PushResult {
            remote: remote.to_string(),
            branch: branch.to_string(),
            commits_sent,
            update: RefUpdate {
                name: branch.to_string(),
                old,
                new: tip,
            },
        })
    }

    /// Fetch everything from `remote`.
    ///
    /// Copies every remote commit unknown locally and creates or moves a
    /// `remote/branch` tracking ref for every remote branch.
    pub fn fetch(&self, remote: &str, local: &mut History, refs: &mut RefDb) -> SyncResult<FetchResult> {
        let source = self.require(remote)?;
        let commits_received = source.history.copy_missing_to(local)?;

        let mut refs_updated = Vec::new();
        for (branch, tip) in &source.branches {
            let old = refs.set_tracking(remote, branch, tip.clone());
            let update = RefUpdate {
                name: format!("{remote}/{branch}"),
                old,
                new: tip.clone(),
            };
            if !update.is_noop() {
                refs_updated.push(update);
            }
        }

        info!(
            remote,
            commits = commits_received.len(),
            refs = refs_updated.len(),
            "fetch complete"
        );
        Ok(FetchResult {
            remote: remote.to_string(),
            commits_received,
            refs_updated,
        })
    }
}
