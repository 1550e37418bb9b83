//! Branch map, HEAD, and remote-tracking refs.
//!
//! [`RefDb`] is a plain value: the engine clones it into a transaction,
//! mutates the copy, and publishes it on success. Every method validates
//! before it writes, so a failed call leaves the value untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_types::CommitId;

use crate::error::{RefError, Result};
use crate::names::validate_branch_name;
use crate::types::{BranchInfo, Head, TrackingRef};

/// All references of one repository.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefDb {
    /// Branch name -> tip commit; `None` while unborn.
    branches: BTreeMap<String, Option<CommitId>>,
    head: Head,
    /// Keyed by `remote/branch`.
    tracking: BTreeMap<String, TrackingRef>,
}

impl RefDb {
    /// A fresh ref database with one unborn branch and HEAD attached to it.
    pub fn new(default_branch: &str) -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(default_branch.to_string(), None);
        Self {
            branches,
            head: Head::Attached(default_branch.to_string()),
            tracking: BTreeMap::new(),
        }
    }

    // ---------------------------------------------------------------
    // HEAD
    // ---------------------------------------------------------------

    pub fn head(&self) -> &Head {
        &self.head
    }

    /// The branch HEAD is attached to, if any.
    pub fn current_branch(&self) -> Option<&str> {
        self.head.branch()
    }

    pub fn is_detached(&self) -> bool {
        self.head.is_detached()
    }

    /// The commit HEAD resolves to. `None` for an unborn or missing branch.
    pub fn head_commit(&self) -> Option<CommitId> {
        match &self.head {
            Head::Attached(name) => self.branches.get(name).cloned().flatten(),
            Head::Detached(id) => Some(id.clone()),
        }
    }

    /// `HEAD -> main` or `HEAD (detached at abc1234)`.
    pub fn head_label(&self) -> String {
        self.head.to_string()
    }

    /// Attach HEAD to an existing branch.
    pub fn attach_head(&mut self, branch: &str) -> Result<()> {
        if !self.branches.contains_key(branch) {
            return Err(RefError::NotFound {
                name: branch.to_string(),
            });
        }
        debug!(branch, "HEAD attached");
        self.head = Head::Attached(branch.to_string());
        Ok(())
    }

    /// Detach HEAD at `commit`.
    pub fn detach_head(&mut self, commit: CommitId) {
        debug!(commit = %commit, "HEAD detached");
        self.head = Head::Detached(commit);
    }

    /// Move HEAD to `commit`: the current branch when attached, HEAD itself
    /// when detached.
    pub fn advance_head(&mut self, commit: CommitId) {
        match &self.head {
            Head::Attached(name) => {
                debug!(branch = %name, commit = %commit, "branch moved");
                self.branches.insert(name.clone(), Some(commit));
            }
            Head::Detached(_) => self.head = Head::Detached(commit),
        }
    }

    // ---------------------------------------------------------------
    // Branches
    // ---------------------------------------------------------------

    /// `Some(tip)` if the branch exists, where `tip` is `None` while unborn.
    pub fn branch(&self, name: &str) -> Option<Option<&CommitId>> {
        self.branches.get(name).map(Option::as_ref)
    }

    pub fn contains_branch(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// All branches sorted by name.
    pub fn list_branches(&self) -> Vec<BranchInfo> {
        let current = self.current_branch();
        self.branches
            .iter()
            .map(|(name, commit)| BranchInfo {
                name: name.clone(),
                commit: commit.clone(),
                is_current: current == Some(name.as_str()),
            })
            .collect()
    }

    /// Create a branch at `commit`. Fails if the name is invalid or taken.
    pub fn create_branch(&mut self, name: &str, commit: CommitId) -> Result<()> {
        validate_branch_name(name)?;
        if self.branches.contains_key(name) {
            return Err(RefError::AlreadyExists {
                name: name.to_string(),
            });
        }
        debug!(branch = name, commit = %commit, "branch created");
        self.branches.insert(name.to_string(), Some(commit));
        Ok(())
    }

    /// Create or move a branch without the existence check.
    pub fn set_branch(&mut self, name: &str, commit: CommitId) -> Result<()> {
        validate_branch_name(name)?;
        debug!(branch = name, commit = %commit, "branch set");
        self.branches.insert(name.to_string(), Some(commit));
        Ok(())
    }

    /// Rename `old` to `new`, relabelling HEAD if it followed `old`.
    ///
    /// An existing `new` is overwritten only when `force` is set.
    pub fn rename_branch(&mut self, old: &str, new: &str, force: bool) -> Result<()> {
        if !self.branches.contains_key(old) {
            return Err(RefError::NotFound {
                name: old.to_string(),
            });
        }
        validate_branch_name(new)?;
        if old == new {
            return Ok(());
        }
        if self.branches.contains_key(new) && !force {
            return Err(RefError::NameCollision {
                name: new.to_string(),
            });
        }

        let tip = self.branches.remove(old).flatten();
        self.branches.insert(new.to_string(), tip);
        if self.current_branch() == Some(old) {
            self.head = Head::Attached(new.to_string());
        }
        debug!(old, new, "branch renamed");
        Ok(())
    }

    /// Delete a branch. Commits are never touched.
    ///
    /// Without `force`, refuses to delete the checked-out branch or a branch
    /// whose tip differs from HEAD's commit. Returns the deleted tip.
    pub fn delete_branch(&mut self, name: &str, force: bool) -> Result<Option<CommitId>> {
        let Some(tip) = self.branches.get(name) else {
            return Err(RefError::NotFound {
                name: name.to_string(),
            });
        };
        if !force {
            if self.current_branch() == Some(name) {
                return Err(RefError::DeleteCurrentBranch {
                    name: name.to_string(),
                });
            }
            if *tip != self.head_commit() {
                return Err(RefError::NotFullyMerged {
                    name: name.to_string(),
                });
            }
        }
        debug!(branch = name, force, "branch deleted");
        Ok(self.branches.remove(name).flatten())
    }

    // ---------------------------------------------------------------
    // Remote-tracking refs
    // ---------------------------------------------------------------

    /// Look up `remote/branch`.
    pub fn tracking_ref(&self, short_name: &str) -> Option<&TrackingRef> {
        self.tracking.get(short_name)
    }

    /// Tracking refs sorted by short name.
    pub fn tracking_refs(&self) -> impl Iterator<Item = &TrackingRef> {
        self.tracking.values()
    }

    /// Create or update `remote/branch`. Returns the previous commit.
    pub fn set_tracking(&mut self, remote: &str, branch: &str, commit: CommitId) -> Option<CommitId> {
        let tracking = TrackingRef {
            remote: remote.to_string(),
            branch: branch.to_string(),
            commit,
        };
        self.tracking
            .insert(tracking.short_name(), tracking)
            .map(|previous| previous.commit)
    }

    /// Drop every tracking ref of `remote`.
    pub fn remove_tracking_for(&mut self, remote: &str) -> usize {
        let before = self.tracking.len();
        self.tracking.retain(|_, tracking| tracking.remote != remote);
        before - self.tracking.len()
    }
}
