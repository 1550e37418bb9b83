//! The complete engine state as one serializable value.

use serde::{Deserialize, Serialize};

use sprout_index::StagingArea;
use sprout_refs::RefDb;
use sprout_store::Snapshot;
use sprout_sync::{History, RemoteRegistry};
use sprout_tree::EntryTree;
use sprout_types::{CommitId, EntryId};

use crate::error::{EngineError, EngineResult};
use crate::guide::{self, Hint, Task};

/// Everything `git init` creates: history, refs, index, and remotes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub history: History,
    pub refs: RefDb,
    pub staging: StagingArea,
    pub remotes: RemoteRegistry,
}

impl Repository {
    /// An empty repository with one unborn branch.
    pub fn new(default_branch: &str) -> Self {
        Self {
            history: History::new(),
            refs: RefDb::new(default_branch),
            staging: StagingArea::new(),
            remotes: RemoteRegistry::new(),
        }
    }

    pub fn head_commit(&self) -> Option<CommitId> {
        self.refs.head_commit()
    }

    /// Snapshot at HEAD, or the empty snapshot while unborn.
    pub fn head_snapshot(&self) -> Snapshot {
        self.head_commit()
            .and_then(|id| self.history.snapshot(&id).cloned())
            .unwrap_or_else(Snapshot::empty)
    }
}

/// Working tree, optional repository, and UI selection.
///
/// `repo` is `None` until `git init`; the tree exists either way.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub tree: EntryTree,
    pub repo: Option<Repository>,
    pub active_file: Option<EntryId>,
    pub active_commit: Option<CommitId>,
    /// Id of the scenario this state was loaded from.
    pub scenario: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub hints: Vec<Hint>,
    /// Id of the hint last opened.
    #[serde(default)]
    pub active_hint: Option<String>,
}

impl EngineState {
    /// Fresh state for `scenario`, with its tasks and hints.
    pub fn new(tree: EntryTree, scenario: impl Into<String>) -> Self {
        let scenario = scenario.into();
        Self {
            tree,
            repo: None,
            active_file: None,
            active_commit: None,
            tasks: guide::tasks_for(&scenario),
            hints: guide::hints_for(&scenario),
            active_hint: None,
            scenario,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.repo.is_some()
    }

    pub fn repo(&self) -> EngineResult<&Repository> {
        self.repo.as_ref().ok_or(EngineError::NotARepository)
    }

    pub fn repo_mut(&mut self) -> EngineResult<&mut Repository> {
        self.repo.as_mut().ok_or(EngineError::NotARepository)
    }

    /// Split borrow of the tree and the repository.
    pub fn worktree_mut(&mut self) -> EngineResult<(&mut EntryTree, &mut Repository)> {
        match &mut self.repo {
            Some(repo) => Ok((&mut self.tree, repo)),
            None => Err(EngineError::NotARepository),
        }
    }

    /// Forget the selected file if it is in `ids`.
    pub(crate) fn deselect(&mut self, ids: &[EntryId]) {
        if self
            .active_file
            .as_ref()
            .is_some_and(|active| ids.contains(active))
        {
            self.active_file = None;
        }
    }
}
