//! Branches, checkout, and hard reset.

use tracing::debug;

use sprout_refs::{BranchInfo, Head, RefError, Revision, TrackingRef};
use sprout_types::CommitId;

use super::{Engine, Transaction};
use crate::error::{EngineError, EngineResult};
use crate::materialize::materialize;
use crate::timeline::EventKind;
use crate::types::{CheckoutOutcome, ResetOutcome};

impl Engine {
    /// `not initialized`, `HEAD (detached at X)`, or `HEAD -> branch`.
    pub fn head_label(&self) -> String {
        match &self.state.repo {
            None => "not initialized".to_string(),
            Some(repo) => repo.refs.head_label(),
        }
    }

    /// All branches sorted by name. Empty before `git init`.
    pub fn list_branches(&self) -> Vec<BranchInfo> {
        self.state
            .repo
            .as_ref()
            .map(|repo| repo.refs.list_branches())
            .unwrap_or_default()
    }

    /// Remote-tracking refs sorted by `remote/branch`.
    pub fn list_tracking_refs(&self) -> Vec<TrackingRef> {
        self.state
            .repo
            .as_ref()
            .map(|repo| repo.refs.tracking_refs().cloned().collect())
            .unwrap_or_default()
    }

    /// Resolve a revision expression such as `main~2` to a commit id.
    pub fn resolve_revision(&self, raw: &str) -> EngineResult<CommitId> {
        let repo = self.state.repo()?;
        Ok(Revision::parse(raw)?.resolve(&repo.refs, &repo.history.commits)?)
    }

    /// Create a branch at HEAD's commit.
    pub fn create_branch(&mut self, name: &str) -> EngineResult<CommitId> {
        self.transact(|txn| {
            let at = create_at_head(txn, name)?;
            txn.record_detail(EventKind::Git, format!("git branch {name}"), at.to_string());
            Ok(at)
        })
    }

    /// Check out a branch: materialize its tip and attach HEAD.
    pub fn checkout_branch(&mut self, name: &str) -> EngineResult<CheckoutOutcome> {
        self.transact(|txn| {
            let outcome = checkout_branch(txn, name, false)?;
            txn.record(EventKind::Git, format!("git checkout {name}"));
            Ok(outcome)
        })
    }

    /// Check out a commit with HEAD detached.
    pub fn checkout_commit(&mut self, id: &CommitId) -> EngineResult<CheckoutOutcome> {
        self.transact(|txn| {
            let outcome = checkout_detached(txn, id)?;
            txn.record(EventKind::Git, format!("git checkout {id}"));
            Ok(outcome)
        })
    }

    /// Check out a branch by name, or any other revision detached.
    pub fn checkout(&mut self, target: &str) -> EngineResult<CheckoutOutcome> {
        self.transact(|txn| {
            let repo = txn.state.repo()?;
            let outcome = if repo.refs.contains_branch(target) {
                checkout_branch(txn, target, false)?
            } else {
                let id = Revision::parse(target)?
                    .resolve(&repo.refs, &repo.history.commits)
                    .map_err(|_| EngineError::RefNotFound(target.to_string()))?;
                checkout_detached(txn, &id)?
            };
            txn.record(EventKind::Git, format!("git checkout {target}"));
            Ok(outcome)
        })
    }

    /// `git switch [-c] <branch>`; `create` makes the branch at HEAD first.
    pub fn switch_branch(&mut self, name: &str, create: bool) -> EngineResult<CheckoutOutcome> {
        self.transact(|txn| {
            if create {
                create_at_head(txn, name)?;
            }
            let outcome = checkout_branch(txn, name, create)?;
            let flag = if create { " -c" } else { "" };
            txn.record(EventKind::Git, format!("git switch{flag} {name}"));
            Ok(outcome)
        })
    }

    /// Rename a branch; `force` overwrites an existing target name.
    pub fn rename_branch(&mut self, old: &str, new: &str, force: bool) -> EngineResult<()> {
        self.transact(|txn| {
            txn.state.repo_mut()?.refs.rename_branch(old, new, force)?;
            let flag = if force { "-M" } else { "-m" };
            txn.record_detail(EventKind::Git, format!("git branch {flag}"), format!("{old} -> {new}"));
            Ok(())
        })
    }

    /// Delete a branch. Returns the commit it pointed at.
    pub fn delete_branch(&mut self, name: &str, force: bool) -> EngineResult<Option<CommitId>> {
        self.transact(|txn| {
            let tip = txn.state.repo_mut()?.refs.delete_branch(name, force)?;
            let flag = if force { "-D" } else { "-d" };
            txn.record_detail(EventKind::Git, format!("git branch {flag}"), name);
            Ok(tip)
        })
    }

    /// `git reset --hard [<rev>]`: materialize the target, move the current
    /// branch (or detached HEAD) to it, and clear the staging area.
    pub fn hard_reset(&mut self, target: Option<&str>) -> EngineResult<ResetOutcome> {
        let target = target.unwrap_or("HEAD");
        self.transact(|txn| {
            let repo = txn.state.repo()?;
            let id = Revision::parse(target)?
                .resolve(&repo.refs, &repo.history.commits)
                .map_err(|_| EngineError::RefNotFound(target.to_string()))?;
            let commit = repo
                .history
                .commit(&id)
                .cloned()
                .ok_or_else(|| EngineError::RefNotFound(target.to_string()))?;
            let snapshot = repo.history.snapshots.require(&id)?.clone();

            let report = materialize(&mut txn.state, &snapshot)?;
            let repo = txn.state.repo_mut()?;
            repo.refs.advance_head(id.clone());
            repo.staging.clear();
            let branch = repo.refs.current_branch().map(str::to_string);

            debug!(commit = %id, "hard reset");
            txn.record_detail(EventKind::Git, "git reset --hard", target);
            Ok(ResetOutcome {
                commit,
                branch,
                report,
            })
        })
    }
}

fn create_at_head(txn: &mut Transaction<'_>, name: &str) -> EngineResult<CommitId> {
    let repo = txn.state.repo_mut()?;
    let Some(head) = repo.head_commit() else {
        let current = repo.refs.current_branch().unwrap_or("HEAD").to_string();
        return Err(EngineError::NoCommitsYet(current));
    };
    repo.refs.create_branch(name, head.clone())?;
    Ok(head)
}

fn checkout_branch(txn: &mut Transaction<'_>, name: &str, created: bool) -> EngineResult<CheckoutOutcome> {
    let repo = txn.state.repo()?;
    let tip = match repo.refs.branch(name) {
        Some(Some(tip)) => tip.clone(),
        Some(None) | None => {
            return Err(RefError::NotFound {
                name: name.to_string(),
            }
            .into())
        }
    };
    let commit = repo
        .history
        .commit(&tip)
        .cloned()
        .ok_or_else(|| EngineError::RefNotFound(tip.to_string()))?;
    let snapshot = repo.history.snapshots.require(&tip)?.clone();

    let report = materialize(&mut txn.state, &snapshot)?;
    let repo = txn.state.repo_mut()?;
    repo.refs.attach_head(name)?;
    repo.staging.clear();
    debug!(branch = name, commit = %tip, "branch checked out");
    Ok(CheckoutOutcome {
        head: Head::Attached(name.to_string()),
        commit,
        created,
        report,
    })
}

fn checkout_detached(txn: &mut Transaction<'_>, id: &CommitId) -> EngineResult<CheckoutOutcome> {
    let repo = txn.state.repo()?;
    let (Some(commit), Some(snapshot)) = (repo.history.commit(id), repo.history.snapshot(id)) else {
        return Err(EngineError::RefNotFound(id.to_string()));
    };
    let commit = commit.clone();
    let snapshot = snapshot.clone();

    let report = materialize(&mut txn.state, &snapshot)?;
    let repo = txn.state.repo_mut()?;
    repo.refs.detach_head(id.clone());
    repo.staging.clear();
    debug!(commit = %id, "HEAD detached by checkout");
    Ok(CheckoutOutcome {
        head: Head::Detached(id.clone()),
        commit,
        created: false,
        report,
    })
}
