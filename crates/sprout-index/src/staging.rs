//! The staging area: entry ids slated for the next commit.
//!
//! The area holds ids, not content. A commit reads each staged file's
//! current state from the tree, so edits made after staging are committed
//! too. Tree mutations that remove entries must be followed by
//! [`StagingArea::retain`] so no dangling ids remain.

use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_tree::{path, EntryTree, FileEntry};
use sprout_types::EntryId;

use crate::error::{IndexError, IndexResult};

/// Ordered set of staged entry ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    ids: Vec<EntryId>,
}

impl StagingArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.ids.contains(id)
    }

    /// Staged ids in staging order.
    pub fn ids(&self) -> &[EntryId] {
        &self.ids
    }

    // ---------------------------------------------------------------
    // Stage operations
    // ---------------------------------------------------------------

    /// Stage the given files and return the display paths newly staged.
    ///
    /// Unknown ids, directories, hidden-only files, unchanged tracked files
    /// and ids already staged are skipped, so re-staging reports nothing.
    pub fn stage_entry_ids(&mut self, tree: &EntryTree, ids: &[EntryId]) -> Vec<String> {
        let mut staged = Vec::new();
        for id in ids {
            let Some(file) = tree.get_file(id) else {
                continue;
            };
            if !is_stageable(file) || self.contains(id) {
                continue;
            }
            self.ids.push(id.clone());
            staged.push(file.display_path().to_string());
        }
        debug!(count = staged.len(), total = self.ids.len(), "staged entries");
        staged
    }

    /// Stage every changed file: modified, pending deletion, or untracked.
    pub fn stage_all_dirty(&mut self, tree: &EntryTree) -> Vec<String> {
        let mut candidates: Vec<&FileEntry> = tree
            .files()
            .filter(|file| is_stageable(file))
            .collect();
        candidates.sort_by(|a, b| a.display_path().cmp(b.display_path()));
        let ids: Vec<EntryId> = candidates.into_iter().map(|file| file.id.clone()).collect();
        self.stage_entry_ids(tree, &ids)
    }

    /// Stage a pathspec: `.` for everything, otherwise a file or directory
    /// path, or the last committed path of a pending deletion.
    pub fn stage_path(&mut self, tree: &EntryTree, pathspec: &str) -> IndexResult<Vec<String>> {
        if pathspec.trim() == "." {
            return Ok(self.stage_all_dirty(tree));
        }
        let ids = match_pathspec(tree, pathspec)?;
        Ok(self.stage_entry_ids(tree, &ids))
    }

    /// Remove ids from the area and return the display paths removed.
    pub fn unstage_entry_ids(&mut self, tree: &EntryTree, ids: &[EntryId]) -> Vec<String> {
        let mut removed = Vec::new();
        for id in ids {
            let Some(pos) = self.ids.iter().position(|staged| staged == id) else {
                continue;
            };
            self.ids.remove(pos);
            let label = tree
                .get_file(id)
                .map(|file| file.display_path().to_string())
                .unwrap_or_else(|| id.to_string());
            removed.push(label);
        }
        debug!(count = removed.len(), total = self.ids.len(), "unstaged entries");
        removed
    }

    /// Unstage a pathspec, resolved the same way as [`stage_path`](Self::stage_path).
    pub fn unstage_path(&mut self, tree: &EntryTree, pathspec: &str) -> IndexResult<Vec<String>> {
        if pathspec.trim() == "." {
            let all = self.ids.clone();
            return Ok(self.unstage_entry_ids(tree, &all));
        }
        let ids = match_pathspec(tree, pathspec)?;
        Ok(self.unstage_entry_ids(tree, &ids))
    }

    /// Empty the area unconditionally.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only the ids for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&EntryId) -> bool) {
        self.ids.retain(|id| keep(id));
    }
}

/// Hidden-only files have nothing to add; tracked files must have changed.
fn is_stageable(file: &FileEntry) -> bool {
    !file.is_hidden_only() && (file.is_untracked() || file.flags.dirty)
}

fn match_pathspec(tree: &EntryTree, pathspec: &str) -> IndexResult<Vec<EntryId>> {
    if let Some(id) = tree.find_id_by_path(pathspec) {
        return Ok(tree.collect_stageable_files(&id));
    }
    let wanted = path::sanitize(pathspec);
    let deletions: Vec<EntryId> = tree
        .files()
        .filter(|file| file.is_pending_deletion() && file.baseline_path == wanted)
        .map(|file| file.id.clone())
        .collect();
    if deletions.is_empty() {
        return Err(IndexError::PathNotFound(pathspec.to_string()));
    }
    Ok(deletions)
}
