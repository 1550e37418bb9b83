//! The commit graph and its traversal queries.
//!
//! [`CommitGraph`] stores commits in a [`BTreeMap`] and keeps a separate
//! creation-order list, which drives `recent` and `missing_from`.
//!
//! # Invariants
//!
//! - Commit ids are unique within the graph.
//! - Every parent reference resolves to a commit already in the graph.
//! - `order` lists every commit exactly once, in append order.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_types::CommitId;

use crate::commit::Commit;
use crate::error::{DagError, DagResult};

/// Append-only, creation-ordered set of commits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitGraph {
    commits: BTreeMap<CommitId, Commit>,
    order: Vec<CommitId>,
}

impl CommitGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Append a commit.
    ///
    /// Parents must already be present. Returns an error if the id already
    /// exists or if a parent reference dangles.
    pub fn append(&mut self, commit: Commit) -> DagResult<()> {
        if self.commits.contains_key(&commit.id) {
            return Err(DagError::DuplicateCommit(commit.id));
        }
        if let Some(parent) = commit.parents.iter().find(|p| !self.commits.contains_key(*p)) {
            return Err(DagError::DanglingParent {
                commit: commit.id.clone(),
                parent: parent.clone(),
            });
        }

        debug!(commit = %commit.id, parents = commit.parents.len(), "appended commit");
        self.order.push(commit.id.clone());
        self.commits.insert(commit.id.clone(), commit);
        Ok(())
    }

    // ---------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------

    pub fn get(&self, id: &CommitId) -> Option<&Commit> {
        self.commits.get(id)
    }

    pub fn contains(&self, id: &CommitId) -> bool {
        self.commits.contains_key(id)
    }

    /// Ids in creation order.
    pub fn ids(&self) -> &[CommitId] {
        &self.order
    }

    /// Commits in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Commit> {
        self.order.iter().filter_map(|id| self.commits.get(id))
    }

    /// Up to `limit` most recently created commits, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&Commit> {
        self.order
            .iter()
            .rev()
            .take(limit)
            .filter_map(|id| self.commits.get(id))
            .collect()
    }

    /// Walk first parents from `head`, newest first, stopping at the root
    /// or after `limit` commits. Empty if `head` is unknown.
    pub fn log_from(&self, head: &CommitId, limit: usize) -> Vec<&Commit> {
        let mut result = Vec::new();
        let mut visited = HashSet::new();
        let mut cursor = self.commits.get(head);
        while let Some(commit) = cursor {
            if result.len() >= limit || !visited.insert(&commit.id) {
                break;
            }
            result.push(commit);
            cursor = commit.parent().and_then(|parent| self.commits.get(parent));
        }
        result
    }

    /// The commit `generations` first-parent steps behind `id`.
    pub fn ancestor(&self, id: &CommitId, generations: usize) -> DagResult<&Commit> {
        let mut current = self
            .commits
            .get(id)
            .ok_or_else(|| DagError::CommitNotFound(id.clone()))?;
        for _ in 0..generations {
            let parent = current
                .parent()
                .ok_or_else(|| DagError::CommitNotFound(current.id.clone()))?;
            current = self
                .commits
                .get(parent)
                .ok_or_else(|| DagError::CommitNotFound(parent.clone()))?;
        }
        Ok(current)
    }

    /// Whether `ancestor` is reachable from `descendant` through first
    /// parents. A commit is its own ancestor.
    pub fn is_ancestor(&self, ancestor: &CommitId, descendant: &CommitId) -> bool {
        self.log_from(descendant, self.len())
            .iter()
            .any(|commit| &commit.id == ancestor)
    }

    /// Commits of this graph absent from `other`, in creation order.
    pub fn missing_from(&self, other: &CommitGraph) -> Vec<&Commit> {
        self.iter().filter(|commit| !other.contains(&commit.id)).collect()
    }
}
