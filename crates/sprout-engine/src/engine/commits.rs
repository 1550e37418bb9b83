//! `init`, staging, `commit`, `log`, and `status`.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use sprout_dag::Commit;
use sprout_index::WorkdirStatus;
use sprout_store::Snapshot;
use sprout_tree::{EntryTree, FileEntry};
use sprout_types::{CommitId, EntryId, Timestamp};

use super::Engine;
use crate::error::{EngineError, EngineResult};
use crate::state::{EngineState, Repository};
use crate::timeline::EventKind;
use crate::types::{CommitSummary, InitOutcome};

impl Engine {
    /// Create the repository, or report that it already exists.
    ///
    /// Re-running keeps all history.
    pub fn initialize_repo(&mut self) -> EngineResult<InitOutcome> {
        self.transact(|txn| {
            if txn.state.is_initialized() {
                txn.record(EventKind::Git, "git init");
                return Ok(InitOutcome::Reinitialized);
            }
            let branch = txn.config.default_branch.clone();
            txn.state.repo = Some(Repository::new(&branch));
            info!(branch = %branch, "repository initialized");
            txn.record_detail(EventKind::Git, "git init", branch);
            Ok(InitOutcome::Created)
        })
    }

    // ---------------------------------------------------------------
    // Staging
    // ---------------------------------------------------------------

    /// Stage files by id. Returns the display paths newly staged.
    pub fn stage_entry_ids(&mut self, ids: &[EntryId]) -> EngineResult<Vec<String>> {
        self.transact(|txn| {
            let (tree, repo) = txn.state.worktree_mut()?;
            let staged = repo.staging.stage_entry_ids(tree, ids);
            if !staged.is_empty() {
                txn.record_detail(EventKind::Git, "git add", staged.join(", "));
            }
            Ok(staged)
        })
    }

    /// Stage every changed or untracked file.
    pub fn stage_all_dirty(&mut self) -> EngineResult<Vec<String>> {
        self.transact(|txn| {
            let (tree, repo) = txn.state.worktree_mut()?;
            let staged = repo.staging.stage_all_dirty(tree);
            if !staged.is_empty() {
                txn.record_detail(EventKind::Git, "git add .", format!("{} file(s)", staged.len()));
            }
            Ok(staged)
        })
    }

    /// Stage pathspecs. Either every pathspec matches or nothing is staged.
    pub fn stage_paths<S: AsRef<str>>(&mut self, pathspecs: &[S]) -> EngineResult<Vec<String>> {
        self.transact(|txn| {
            let (tree, repo) = txn.state.worktree_mut()?;
            let mut staged = Vec::new();
            for spec in pathspecs {
                staged.extend(repo.staging.stage_path(tree, spec.as_ref())?);
            }
            if !staged.is_empty() {
                let specs: Vec<&str> = pathspecs.iter().map(AsRef::as_ref).collect();
                txn.record(EventKind::Git, format!("git add {}", specs.join(" ")));
            }
            Ok(staged)
        })
    }

    /// Unstage files by id. Returns the display paths removed.
    pub fn unstage_entry_ids(&mut self, ids: &[EntryId]) -> EngineResult<Vec<String>> {
        self.transact(|txn| {
            let (tree, repo) = txn.state.worktree_mut()?;
            Ok(repo.staging.unstage_entry_ids(tree, ids))
        })
    }

    /// Unstage pathspecs. Either every pathspec matches or nothing changes.
    pub fn unstage_paths<S: AsRef<str>>(&mut self, pathspecs: &[S]) -> EngineResult<Vec<String>> {
        self.transact(|txn| {
            let (tree, repo) = txn.state.worktree_mut()?;
            let mut removed = Vec::new();
            for spec in pathspecs {
                removed.extend(repo.staging.unstage_path(tree, spec.as_ref())?);
            }
            if !removed.is_empty() {
                txn.record_detail(EventKind::Git, "git reset", removed.join(", "));
            }
            Ok(removed)
        })
    }

    /// Empty the staging area (`git reset`). Returns how many ids were dropped.
    pub fn clear_stage(&mut self) -> EngineResult<usize> {
        self.transact(|txn| {
            let repo = txn.state.repo_mut()?;
            let count = repo.staging.len();
            repo.staging.clear();
            txn.record(EventKind::Git, "git reset");
            Ok(count)
        })
    }

    // ---------------------------------------------------------------
    // Commit
    // ---------------------------------------------------------------

    /// Record the staged files as a new commit on the current branch.
    pub fn commit_changes(&mut self, message: &str) -> EngineResult<CommitSummary> {
        self.transact(|txn| {
            let author = txn.config.author.clone();
            let summary = commit_staged(&mut txn.state, message, &author)?;
            txn.record_detail(
                EventKind::Git,
                format!("git commit {}", summary.id),
                summary.message.clone(),
            );
            Ok(summary)
        })
    }

    /// Commits reachable from HEAD, newest first.
    ///
    /// Falls back to the most recent commits in creation order when HEAD
    /// has no reachable chain (unborn branch or a deleted current branch).
    pub fn get_commit_log(&self, limit: usize) -> EngineResult<Vec<Commit>> {
        let repo = self.state.repo()?;
        let commits = &repo.history.commits;
        let mut log = repo
            .head_commit()
            .map(|head| commits.log_from(&head, limit))
            .unwrap_or_default();
        if log.is_empty() {
            log = commits.recent(limit);
        }
        Ok(log.into_iter().cloned().collect())
    }

    /// Compare the tree and the staging area against HEAD.
    pub fn status(&self) -> EngineResult<WorkdirStatus> {
        let repo = self.state.repo()?;
        Ok(WorkdirStatus::compute(&self.state.tree, &repo.staging))
    }
}

fn commit_staged(state: &mut EngineState, message: &str, author: &str) -> EngineResult<CommitSummary> {
    let (tree, repo) = state.worktree_mut()?;
    let Some(branch) = repo.refs.current_branch().map(str::to_string) else {
        return Err(EngineError::DetachedHeadCommit);
    };
    let message = message.trim();
    if message.is_empty() {
        return Err(EngineError::EmptyMessage);
    }
    let staged: Vec<EntryId> = repo
        .staging
        .ids()
        .iter()
        .filter(|id| tree.get_file(id).is_some())
        .cloned()
        .collect();
    if staged.is_empty() {
        return Err(EngineError::NothingStaged);
    }

    let parent = repo.head_commit();
    let snapshot = derive_snapshot(tree, &repo.head_snapshot(), &staged);
    let id = CommitId::generate_unless(|candidate| repo.history.contains(candidate));
    let commit = Commit::new(id.clone(), message, parent, author, Timestamp::now());
    repo.history.record(commit, snapshot)?;
    repo.refs.advance_head(id.clone());

    for file in &staged {
        tree.mark_committed(file)?;
    }
    retire_superseded(tree, &staged)?;
    repo.staging.clear();

    debug!(commit = %id, branch = %branch, files = staged.len(), "commit appended");
    Ok(CommitSummary {
        id,
        branch,
        message: message.to_string(),
        files: staged.len(),
    })
}

/// Apply the staged files on top of the parent snapshot.
///
/// Old keys are removed before new ones are written so a file moved onto
/// another file's former path keeps its content.
fn derive_snapshot(tree: &EntryTree, parent: &Snapshot, staged: &[EntryId]) -> Snapshot {
    let files: Vec<&FileEntry> = staged.iter().filter_map(|id| tree.get_file(id)).collect();
    parent.derive(|paths| {
        for file in &files {
            if file.flags.deleted || (file.flags.tracked && file.is_relocated()) {
                paths.remove(&file.baseline_path);
            }
        }
        for file in files.iter().filter(|file| !file.flags.deleted) {
            paths.insert(file.path.clone(), file.content.clone());
        }
    })
}

/// Retire files whose baseline path is owned by another live file.
///
/// A file committed in place takes over its path: every tombstone with
/// that baseline is dropped, pending or not, and a live file that still
/// carries it (moved away without being staged) becomes untracked. Absent
/// tombstones whose baseline belongs to any live tracked file go as well.
fn retire_superseded(tree: &mut EntryTree, committed: &[EntryId]) -> EngineResult<()> {
    let owners: BTreeMap<String, EntryId> = committed
        .iter()
        .filter_map(|id| tree.get_file(id))
        .filter(|file| !file.flags.deleted)
        .map(|file| (file.baseline_path.clone(), file.id.clone()))
        .collect();
    let live: BTreeSet<String> = tree
        .files()
        .filter(|file| file.flags.tracked && !file.flags.deleted)
        .map(|file| file.baseline_path.clone())
        .collect();

    let mut dropped = Vec::new();
    let mut untracked = Vec::new();
    for file in tree.files().filter(|file| file.flags.tracked) {
        let owner = owners.get(&file.baseline_path);
        if file.flags.deleted {
            if owner.is_some() || (file.is_absent() && live.contains(&file.baseline_path)) {
                dropped.push(file.id.clone());
            }
        } else if owner.is_some_and(|owner| *owner != file.id) {
            untracked.push(file.id.clone());
        }
    }

    for id in &dropped {
        tree.remove_file(id)?;
    }
    for id in &untracked {
        tree.untrack_file(id)?;
    }
    if !dropped.is_empty() || !untracked.is_empty() {
        debug!(
            dropped = dropped.len(),
            untracked = untracked.len(),
            "superseded files retired"
        );
    }
    Ok(())
}
