//! Working tree status types.
//!
//! These types represent the result of comparing the working tree and the
//! staging area against the last committed state.

use serde::{Deserialize, Serialize};

use sprout_tree::{EntryTree, FileEntry};

use crate::staging::StagingArea;

/// Complete status of the working tree relative to HEAD.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkdirStatus {
    /// Files staged for the next commit.
    pub staged: Vec<StatusEntry>,
    /// Tracked files changed since the last commit but not staged.
    pub modified: Vec<StatusEntry>,
    /// Files present in the working tree but never committed.
    pub untracked: Vec<String>,
    /// Tracked files deleted from the working tree but not staged.
    pub deleted: Vec<String>,
}

impl WorkdirStatus {
    /// Create an empty status.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `tree` and `staging` against the committed baseline.
    pub fn compute(tree: &EntryTree, staging: &StagingArea) -> Self {
        let mut status = Self::new();

        for id in staging.ids() {
            if let Some(file) = tree.get_file(id) {
                status
                    .staged
                    .push(StatusEntry::new(file.display_path(), FileStatus::of(file)));
            }
        }

        for file in tree.files().filter(|file| !staging.contains(&file.id)) {
            if file.is_untracked() && file.is_visible() {
                status.untracked.push(file.path.clone());
            } else if file.is_pending_deletion() {
                status.deleted.push(file.baseline_path.clone());
            } else if file.is_modified() {
                status
                    .modified
                    .push(StatusEntry::new(file.path.clone(), FileStatus::of(file)));
            }
        }

        status.staged.sort_by(|a, b| a.path.cmp(&b.path));
        status.modified.sort_by(|a, b| a.path.cmp(&b.path));
        status.untracked.sort();
        status.deleted.sort();
        status
    }

    /// Returns `true` if there are no changes of any kind.
    pub fn is_clean(&self) -> bool {
        self.staged.is_empty()
            && self.modified.is_empty()
            && self.untracked.is_empty()
            && self.deleted.is_empty()
    }

    /// Returns `true` if there are any staged changes.
    pub fn has_staged_changes(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Returns `true` if any tracked file has unstaged changes.
    pub fn has_unstaged_changes(&self) -> bool {
        !self.modified.is_empty() || !self.deleted.is_empty()
    }

    /// Total number of entries across all categories.
    pub fn total_entries(&self) -> usize {
        self.staged.len() + self.modified.len() + self.untracked.len() + self.deleted.len()
    }
}

/// A single status entry representing a file change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEntry {
    /// The file path, `/`-rooted.
    pub path: String,
    /// The kind of change.
    pub status: FileStatus,
}

impl StatusEntry {
    /// Create a new status entry.
    pub fn new(path: impl Into<String>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// The kind of file change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    /// A file that has never been committed.
    New,
    /// A tracked file whose content has changed.
    Modified,
    /// A tracked file that has been removed.
    Deleted,
    /// A tracked file that now lives at another path.
    Renamed {
        /// The path as last committed.
        from: String,
    },
}

impl FileStatus {
    /// Classify a file's pending change.
    pub fn of(file: &FileEntry) -> Self {
        if file.flags.deleted {
            Self::Deleted
        } else if file.is_untracked() {
            Self::New
        } else if file.is_relocated() {
            Self::Renamed {
                from: file.baseline_path.clone(),
            }
        } else {
            Self::Modified
        }
    }

    /// Column label in `git status` style, padded to a common width.
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "new file:  ",
            Self::Modified => "modified:  ",
            Self::Deleted => "deleted:   ",
            Self::Renamed { .. } => "renamed:   ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprout_tree::EntryKind;

    #[test]
    fn empty_status_is_clean() {
        let status = WorkdirStatus::new();
        assert!(status.is_clean());
        assert!(!status.has_staged_changes());
        assert_eq!(status.total_entries(), 0);
    }

    #[test]
    fn clean_tree_reports_clean() {
        let mut tree = EntryTree::new("repo");
        tree.insert_tracked_file("/a.txt", "a").unwrap();
        let status = WorkdirStatus::compute(&tree, &StagingArea::new());
        assert!(status.is_clean());
    }

    #[test]
    fn compute_splits_categories() {
        let mut tree = EntryTree::new("repo");
        let root = tree.root_id().clone();
        let edited = tree.insert_tracked_file("/edited.txt", "a").unwrap();
        let removed = tree.insert_tracked_file("/removed.txt", "b").unwrap();
        let moved = tree.insert_tracked_file("/moved.txt", "c").unwrap();
        let fresh = tree.create_entry(&root, "fresh.txt", EntryKind::File).unwrap();
        tree.update_file_content(&edited, "a2").unwrap();
        tree.delete_entry(&removed).unwrap();
        tree.rename_entry(&moved, "there.txt").unwrap();

        let mut staging = StagingArea::new();
        staging.stage_entry_ids(&tree, &[fresh, moved]);

        let status = WorkdirStatus::compute(&tree, &staging);
        assert_eq!(
            status.staged,
            vec![
                StatusEntry::new("/fresh.txt", FileStatus::New),
                StatusEntry::new(
                    "/there.txt",
                    FileStatus::Renamed {
                        from: "/moved.txt".into()
                    }
                ),
            ]
        );
        assert_eq!(status.modified, vec![StatusEntry::new("/edited.txt", FileStatus::Modified)]);
        assert_eq!(status.deleted, vec!["/removed.txt"]);
        assert!(status.untracked.is_empty());
        assert!(status.has_unstaged_changes());
        assert_eq!(status.total_entries(), 4);
    }

    #[test]
    fn absent_tombstones_are_not_reported() {
        let mut tree = EntryTree::new("repo");
        let id = tree.insert_tracked_file("/gone.txt", "x").unwrap();
        tree.mark_absent(&id).unwrap();
        assert!(WorkdirStatus::compute(&tree, &StagingArea::new()).is_clean());
    }
}
