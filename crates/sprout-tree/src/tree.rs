//! The working tree and all mutations on it.
//!
//! [`EntryTree`] stores entries in a [`BTreeMap`] keyed by id. Each
//! directory's `children` list is the membership index; `parent` pointers
//! are kept in sync by every mutation.
//!
//! # Invariants
//!
//! - Every entry except the root appears in exactly one child list.
//! - Every stored path equals the path derived from the parent chain.
//! - Tracked files are tombstoned on delete, never removed outright.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_types::{EntryId, Timestamp};

use crate::entry::{DirectoryEntry, Entry, EntryKind, FileEntry};
use crate::error::{TreeError, TreeResult};
use crate::path;

/// Outcome of [`EntryTree::delete_entry`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteReport {
    /// Path of the deleted entry.
    pub path: String,
    /// Entries physically removed from the tree.
    pub removed: Vec<EntryId>,
    /// Tracked files that became tombstones.
    pub tombstoned: Vec<EntryId>,
}

/// Directory/file tree with derived paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryTree {
    root: EntryId,
    entries: BTreeMap<EntryId, Entry>,
}

impl EntryTree {
    /// A tree holding only an empty root directory.
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = EntryId::root();
        let mut entries = BTreeMap::new();
        entries.insert(
            root.clone(),
            Entry::Directory(DirectoryEntry {
                id: root.clone(),
                name: root_name.into(),
                parent: None,
                path: "/".to_string(),
                children: Vec::new(),
                hidden: false,
            }),
        );
        Self { root, entries }
    }

    pub fn root_id(&self) -> &EntryId {
        &self.root
    }

    pub fn root_name(&self) -> &str {
        self.entries.get(&self.root).map(Entry::name).unwrap_or_default()
    }

    /// Total number of entries, hidden ones and the root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn contains(&self, id: &EntryId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn get_file(&self, id: &EntryId) -> Option<&FileEntry> {
        self.entries.get(id).and_then(Entry::as_file)
    }

    /// Every entry in id order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Every file, tombstones included.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.entries.values().filter_map(Entry::as_file)
    }

    /// Ids of every file, in id order.
    pub fn file_ids(&self) -> Vec<EntryId> {
        self.files().map(|file| file.id.clone()).collect()
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Resolve a `/`-rooted path by walking visible child names from the root.
    pub fn find_id_by_path(&self, raw: &str) -> Option<EntryId> {
        let mut current = self.root.clone();
        for segment in path::segments(raw) {
            let dir = self.entries.get(&current)?.as_directory()?;
            current = self.visible_child_named(dir, segment)?.id().clone();
        }
        Some(current)
    }

    /// The visible entry at `path`, if any.
    pub fn get_entry_by_path(&self, raw: &str) -> Option<&Entry> {
        self.find_id_by_path(raw).and_then(|id| self.entries.get(&id))
    }

    /// Whether a file could not be placed at `path` without colliding with
    /// a visible entry: the path is taken, or one of its ancestors is a file.
    pub fn is_path_blocked(&self, raw: &str) -> bool {
        let target = path::sanitize(raw);
        let segments: Vec<&str> = path::segments(&target).collect();
        let mut current = self.root.clone();
        for (depth, segment) in segments.iter().enumerate() {
            let Some(dir) = self.entries.get(&current).and_then(Entry::as_directory) else {
                return true;
            };
            match self.visible_child_named(dir, segment) {
                None => return false,
                Some(_) if depth + 1 == segments.len() => return true,
                Some(Entry::File(_)) => return true,
                Some(entry) => current = entry.id().clone(),
            }
        }
        true
    }

    /// Visible children of a directory, in insertion order.
    pub fn visible_children(&self, id: &EntryId) -> Vec<&Entry> {
        match self.entries.get(id) {
            Some(Entry::Directory(dir)) => dir
                .children
                .iter()
                .filter_map(|child| self.entries.get(child))
                .filter(|entry| !entry.is_hidden())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Files at or below `id` that staging may consider.
    ///
    /// Tombstones are included so that deletions can be staged; files hidden
    /// without being deleted are not.
    pub fn collect_stageable_files(&self, id: &EntryId) -> Vec<EntryId> {
        match self.entries.get(id) {
            None => Vec::new(),
            Some(Entry::File(file)) if file.is_hidden_only() => Vec::new(),
            Some(Entry::File(file)) => vec![file.id.clone()],
            Some(Entry::Directory(dir)) => dir
                .children
                .iter()
                .flat_map(|child| self.collect_stageable_files(child))
                .collect(),
        }
    }

    fn visible_child_named<'a>(&'a self, dir: &DirectoryEntry, name: &str) -> Option<&'a Entry> {
        dir.children
            .iter()
            .filter_map(|child| self.entries.get(child))
            .find(|entry| !entry.is_hidden() && entry.name() == name)
    }

    fn hidden_directory_named(&self, dir: &DirectoryEntry, name: &str) -> Option<EntryId> {
        dir.children
            .iter()
            .filter_map(|child| self.entries.get(child))
            .find(|entry| {
                entry.is_hidden() && entry.kind() == EntryKind::Directory && entry.name() == name
            })
            .map(|entry| entry.id().clone())
    }

    fn visible_directory(&self, id: &EntryId) -> TreeResult<&DirectoryEntry> {
        let invalid = |reason: &str| TreeError::InvalidParent {
            parent: id.to_string(),
            reason: reason.to_string(),
        };
        match self.entries.get(id) {
            None => Err(invalid("does not exist")),
            Some(Entry::File(_)) => Err(invalid("is a file")),
            Some(Entry::Directory(dir)) if dir.hidden => Err(invalid("has been deleted")),
            Some(Entry::Directory(dir)) => Ok(dir),
        }
    }

    fn validate_name(
        &self,
        dir: &DirectoryEntry,
        raw: &str,
        except: Option<&EntryId>,
    ) -> TreeResult<String> {
        let name = raw.trim();
        let invalid = |reason: &str| TreeError::InvalidName {
            name: raw.to_string(),
            reason: reason.to_string(),
        };
        if name.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name == "." || name == ".." {
            return Err(invalid("name is reserved"));
        }
        if name.contains('/') {
            return Err(invalid("name cannot contain '/'"));
        }
        if let Some(existing) = self.visible_child_named(dir, name) {
            if Some(existing.id()) != except {
                return Err(invalid("an entry with this name already exists"));
            }
        }
        Ok(name.to_string())
    }

    fn fresh_id(&self) -> EntryId {
        loop {
            let id = EntryId::generate();
            if !self.entries.contains_key(&id) {
                return id;
            }
        }
    }

    // ---------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------

    /// Create a file or directory under `parent`.
    ///
    /// New files are untracked and dirty with empty content. Creating a
    /// directory whose name matches a hidden sibling directory revives it.
    pub fn create_entry(
        &mut self,
        parent: &EntryId,
        name: &str,
        kind: EntryKind,
    ) -> TreeResult<EntryId> {
        let dir = self.visible_directory(parent)?;
        let name = self.validate_name(dir, name, None)?;
        let path = path::join(&dir.path, &name);
        let revived = match kind {
            EntryKind::Directory => self.hidden_directory_named(dir, &name),
            EntryKind::File => None,
        };

        if let Some(revived) = revived {
            if let Some(Entry::Directory(hidden)) = self.entries.get_mut(&revived) {
                hidden.hidden = false;
            }
            debug!(id = %revived, path = %path, "directory revived");
            return Ok(revived);
        }

        let id = self.fresh_id();
        let entry = match kind {
            EntryKind::File => Entry::File(FileEntry::untracked(
                id.clone(),
                name,
                parent.clone(),
                path.clone(),
            )),
            EntryKind::Directory => Entry::Directory(DirectoryEntry {
                id: id.clone(),
                name,
                parent: Some(parent.clone()),
                path: path.clone(),
                children: Vec::new(),
                hidden: false,
            }),
        };
        self.attach(entry, parent);
        debug!(id = %id, path = %path, kind = %kind, "entry created");
        Ok(id)
    }

    /// Rename an entry in place and re-derive the paths below it.
    ///
    /// Returns the new path.
    pub fn rename_entry(&mut self, id: &EntryId, new_name: &str) -> TreeResult<String> {
        if *id == self.root {
            return Err(TreeError::RootImmutable);
        }
        let entry = self
            .entries
            .get(id)
            .filter(|entry| !entry.is_hidden())
            .ok_or_else(|| TreeError::EntryNotFound(id.to_string()))?;
        let parent = entry
            .parent()
            .cloned()
            .ok_or(TreeError::RootImmutable)?;
        let dir = self.visible_directory(&parent)?;
        let name = self.validate_name(dir, new_name, Some(id))?;
        let parent_path = dir.path.clone();

        if let Some(entry) = self.entries.get_mut(id) {
            entry.set_name(name);
        }
        self.rederive_paths(id, &parent_path);

        let new_path = self
            .entries
            .get(id)
            .map(|entry| entry.path().to_string())
            .unwrap_or_default();
        debug!(id = %id, path = %new_path, "entry renamed");
        Ok(new_path)
    }

    /// Delete an entry.
    ///
    /// Untracked files are removed outright. Tracked files become hidden,
    /// deleted, dirty tombstones with cleared content. Directories recurse;
    /// a directory left with no children is removed, one that still holds
    /// tombstones is hidden.
    pub fn delete_entry(&mut self, id: &EntryId) -> TreeResult<DeleteReport> {
        if *id == self.root {
            return Err(TreeError::RootImmutable);
        }
        let entry = self
            .entries
            .get(id)
            .filter(|entry| !entry.is_hidden())
            .ok_or_else(|| TreeError::EntryNotFound(id.to_string()))?;
        let parent = entry.parent().cloned();
        let mut report = DeleteReport {
            path: entry.path().to_string(),
            ..DeleteReport::default()
        };

        let retained = self.delete_subtree(id, &mut report);
        if !retained {
            if let Some(parent) = parent {
                self.detach(&parent, id);
            }
        }
        debug!(
            path = %report.path,
            removed = report.removed.len(),
            tombstoned = report.tombstoned.len(),
            "entry deleted"
        );
        Ok(report)
    }

    /// Returns `true` if the entry survives (as a tombstone or hidden directory).
    fn delete_subtree(&mut self, id: &EntryId, report: &mut DeleteReport) -> bool {
        let children = match self.entries.get_mut(id) {
            None => return false,
            Some(Entry::Directory(dir)) => Some(dir.children.clone()),
            Some(Entry::File(file)) if file.flags.tracked => {
                if !file.flags.deleted {
                    file.flags.deleted = true;
                    file.flags.hidden = true;
                    file.flags.dirty = true;
                    file.content.clear();
                    report.tombstoned.push(id.clone());
                }
                return true;
            }
            Some(Entry::File(_)) => None,
        };
        let Some(children) = children else {
            self.entries.remove(id);
            report.removed.push(id.clone());
            return false;
        };

        let kept: Vec<EntryId> = children
            .into_iter()
            .filter(|child| self.delete_subtree(child, report))
            .collect();

        if kept.is_empty() {
            self.entries.remove(id);
            report.removed.push(id.clone());
            false
        } else {
            if let Some(Entry::Directory(dir)) = self.entries.get_mut(id) {
                dir.children = kept;
                dir.hidden = true;
            }
            true
        }
    }

    /// Replace a visible file's content and recompute its dirty flag.
    pub fn update_file_content(&mut self, id: &EntryId, content: impl Into<String>) -> TreeResult<()> {
        match self.entries.get_mut(id) {
            Some(Entry::File(file)) if file.is_visible() => {
                file.content = content.into();
                file.last_edited = Some(Timestamp::now());
                file.refresh_dirty();
                Ok(())
            }
            Some(Entry::Directory(dir)) if !dir.hidden => Err(TreeError::NotAFile(dir.path.clone())),
            _ => Err(TreeError::EntryNotFound(id.to_string())),
        }
    }

    /// Make sure a visible directory exists at `path`, creating or unhiding
    /// directories along the way.
    pub fn ensure_directory(&mut self, raw: &str) -> TreeResult<EntryId> {
        let target = path::sanitize(raw);
        let mut current = self.root.clone();
        for segment in path::segments(&target) {
            let dir = self.visible_directory(&current)?;
            let existing = self
                .visible_child_named(dir, segment)
                .map(|entry| (entry.id().clone(), entry.kind(), entry.path().to_string()));
            current = match existing {
                Some((id, EntryKind::Directory, _)) => id,
                Some((_, EntryKind::File, file_path)) => {
                    return Err(TreeError::InvalidParent {
                        parent: file_path,
                        reason: "is a file".to_string(),
                    })
                }
                None => self.create_entry(&current, segment, EntryKind::Directory)?,
            };
        }
        Ok(current)
    }

    /// Move a file to `path`, creating parent directories as needed.
    pub fn relocate(&mut self, id: &EntryId, raw: &str) -> TreeResult<()> {
        let target = path::sanitize(raw);
        let file = self
            .get_file(id)
            .ok_or_else(|| TreeError::EntryNotFound(id.to_string()))?;
        if file.path == target {
            return Ok(());
        }
        let old_parent = file.parent.clone();
        let name = path::file_name(&target).to_string();
        if name.is_empty() {
            return Err(TreeError::InvalidName {
                name: target,
                reason: "path has no file name".to_string(),
            });
        }
        let new_parent = self.ensure_directory(path::parent(&target))?;

        self.detach(&old_parent, id);
        if let Some(Entry::File(file)) = self.entries.get_mut(id) {
            file.name = name;
            file.parent = new_parent.clone();
        }
        if let Some(Entry::Directory(dir)) = self.entries.get_mut(&new_parent) {
            dir.children.push(id.clone());
        }
        let parent_path = path::parent(&target).to_string();
        self.rederive_paths(id, &parent_path);
        debug!(id = %id, path = %target, "file relocated");
        Ok(())
    }

    /// Create a clean, tracked file at `path` with the given content.
    pub fn insert_tracked_file(&mut self, raw: &str, content: impl Into<String>) -> TreeResult<EntryId> {
        let target = path::sanitize(raw);
        let parent = self.ensure_directory(path::parent(&target))?;
        let dir = self.visible_directory(&parent)?;
        let name = self.validate_name(dir, path::file_name(&target), None)?;
        let id = self.fresh_id();
        let file = FileEntry::tracked(id.clone(), name, parent.clone(), target, content.into());
        self.attach(Entry::File(file), &parent);
        Ok(id)
    }

    /// Bring a tracked file back to a clean state holding `content`.
    ///
    /// Ancestor directories are unhidden so the file is addressable again.
    /// Fails without changing anything if an ancestor is hidden and a
    /// visible sibling has taken its name.
    pub fn restore_file(&mut self, id: &EntryId, content: &str) -> TreeResult<()> {
        if self.get_file(id).is_none() {
            return Err(TreeError::NotAFile(id.to_string()));
        }
        self.unhide_ancestors(id)?;
        let Some(Entry::File(file)) = self.entries.get_mut(id) else {
            return Err(TreeError::NotAFile(id.to_string()));
        };
        file.content = content.to_string();
        file.initial_content = content.to_string();
        file.baseline_path = file.path.clone();
        file.flags.tracked = true;
        file.flags.dirty = false;
        file.flags.deleted = false;
        file.flags.hidden = false;
        Ok(())
    }

    /// Take a file out of path resolution without touching anything else.
    ///
    /// Used while tracked files are rearranged so they cannot collide with
    /// each other; every hidden file must end up restored or absent.
    pub fn hide_file(&mut self, id: &EntryId) -> TreeResult<()> {
        let Some(Entry::File(file)) = self.entries.get_mut(id) else {
            return Err(TreeError::NotAFile(id.to_string()));
        };
        file.flags.hidden = true;
        Ok(())
    }

    /// Forget a live file's committed state. It becomes a new, untracked
    /// file at its current path.
    pub fn untrack_file(&mut self, id: &EntryId) -> TreeResult<()> {
        match self.entries.get_mut(id) {
            Some(Entry::File(file)) if !file.flags.deleted => {
                file.flags.tracked = false;
                file.initial_content.clear();
                file.refresh_dirty();
                debug!(id = %id, path = %file.path, "file untracked");
                Ok(())
            }
            Some(Entry::File(file)) => Err(TreeError::EntryNotFound(file.path.clone())),
            Some(Entry::Directory(dir)) => Err(TreeError::NotAFile(dir.path.clone())),
            None => Err(TreeError::EntryNotFound(id.to_string())),
        }
    }

    /// Turn a tracked file into a tombstone that matches HEAD.
    pub fn mark_absent(&mut self, id: &EntryId) -> TreeResult<()> {
        let Some(Entry::File(file)) = self.entries.get_mut(id) else {
            return Err(TreeError::NotAFile(id.to_string()));
        };
        file.content.clear();
        file.initial_content.clear();
        file.flags.hidden = true;
        file.flags.deleted = true;
        file.flags.dirty = false;
        Ok(())
    }

    /// Record that a file's current state has been committed.
    pub fn mark_committed(&mut self, id: &EntryId) -> TreeResult<()> {
        match self.entries.get_mut(id) {
            Some(Entry::File(file)) => {
                file.mark_committed();
                Ok(())
            }
            Some(Entry::Directory(dir)) => Err(TreeError::NotAFile(dir.path.clone())),
            None => Err(TreeError::EntryNotFound(id.to_string())),
        }
    }

    /// Physically remove a file from the tree.
    pub fn remove_file(&mut self, id: &EntryId) -> TreeResult<()> {
        let file = self
            .get_file(id)
            .ok_or_else(|| TreeError::EntryNotFound(id.to_string()))?;
        let parent = file.parent.clone();
        self.detach(&parent, id);
        self.entries.remove(id);
        Ok(())
    }

    fn attach(&mut self, entry: Entry, parent: &EntryId) {
        let id = entry.id().clone();
        self.entries.insert(id.clone(), entry);
        if let Some(Entry::Directory(dir)) = self.entries.get_mut(parent) {
            dir.children.push(id);
        }
    }

    fn detach(&mut self, parent: &EntryId, id: &EntryId) {
        if let Some(Entry::Directory(dir)) = self.entries.get_mut(parent) {
            dir.children.retain(|child| child != id);
        }
    }

    fn unhide_ancestors(&mut self, id: &EntryId) -> TreeResult<()> {
        let mut hidden = Vec::new();
        let mut next = self.entries.get(id).and_then(Entry::parent).cloned();
        while let Some(current) = next {
            let Some(Entry::Directory(dir)) = self.entries.get(&current) else {
                break;
            };
            if dir.hidden {
                let taken = dir
                    .parent
                    .as_ref()
                    .and_then(|parent| self.entries.get(parent))
                    .and_then(Entry::as_directory)
                    .and_then(|parent| self.visible_child_named(parent, &dir.name));
                if let Some(taken) = taken {
                    return Err(TreeError::InvalidName {
                        name: dir.name.clone(),
                        reason: format!("{} already exists", taken.path()),
                    });
                }
                hidden.push(current.clone());
            }
            next = dir.parent.clone();
        }
        for id in hidden {
            if let Some(Entry::Directory(dir)) = self.entries.get_mut(&id) {
                dir.hidden = false;
            }
        }
        Ok(())
    }

    /// Recompute the path of `id` and everything below it from `parent_path`.
    fn rederive_paths(&mut self, id: &EntryId, parent_path: &str) {
        let (path, children) = match self.entries.get_mut(id) {
            None => return,
            Some(entry) => {
                let path = path::join(parent_path, entry.name());
                entry.set_path(path.clone());
                match entry {
                    Entry::File(file) => {
                        file.refresh_dirty();
                        return;
                    }
                    Entry::Directory(dir) => (path, dir.children.clone()),
                }
            }
        };
        for child in &children {
            self.rederive_paths(child, &path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> EntryTree {
        EntryTree::new("playground")
    }

    fn committed_file(tree: &mut EntryTree, parent: &EntryId, name: &str, content: &str) -> EntryId {
        let id = tree.create_entry(parent, name, EntryKind::File).unwrap();
        tree.update_file_content(&id, content).unwrap();
        tree.mark_committed(&id).unwrap();
        id
    }

    #[test]
    fn create_file_is_untracked_and_dirty() {
        let mut t = tree();
        let root = t.root_id().clone();
        let id = t.create_entry(&root, "  a.txt ", EntryKind::File).unwrap();
        let file = t.get_file(&id).unwrap();
        assert_eq!(file.name, "a.txt");
        assert_eq!(file.path, "/a.txt");
        assert!(file.is_untracked());
        assert!(file.flags.dirty);
        assert_eq!(t.visible_children(&root).len(), 1);
    }

    #[test]
    fn create_rejects_bad_parent_and_names() {
        let mut t = tree();
        let root = t.root_id().clone();
        let file = t.create_entry(&root, "a.txt", EntryKind::File).unwrap();

        let err = t.create_entry(&file, "x", EntryKind::File).unwrap_err();
        assert!(matches!(err, TreeError::InvalidParent { .. }));
        let err = t
            .create_entry(&EntryId::from_raw("missing"), "x", EntryKind::File)
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidParent { .. }));

        for bad in ["", "   ", ".", "..", "a/b", "a.txt"] {
            let err = t.create_entry(&root, bad, EntryKind::File).unwrap_err();
            assert!(matches!(err, TreeError::InvalidName { .. }), "{bad:?}");
        }
    }

    #[test]
    fn lookup_by_path() {
        let mut t = tree();
        let root = t.root_id().clone();
        let src = t.create_entry(&root, "src", EntryKind::Directory).unwrap();
        let main = t.create_entry(&src, "main.ts", EntryKind::File).unwrap();

        assert_eq!(t.find_id_by_path("src/main.ts"), Some(main.clone()));
        assert_eq!(t.find_id_by_path("/src/main.ts/"), Some(main));
        assert_eq!(t.find_id_by_path("/"), Some(root));
        assert!(t.get_entry_by_path("/src/other.ts").is_none());
        assert!(t.get_entry_by_path("/src/main.ts/deeper").is_none());
    }

    #[test]
    fn rename_directory_rederives_descendants() {
        let mut t = tree();
        let root = t.root_id().clone();
        let src = t.create_entry(&root, "src", EntryKind::Directory).unwrap();
        let lib = t.create_entry(&src, "lib", EntryKind::Directory).unwrap();
        let tracked = committed_file(&mut t, &lib, "a.ts", "a");
        let fresh = t.create_entry(&lib, "b.ts", EntryKind::File).unwrap();

        let new_path = t.rename_entry(&src, "app").unwrap();
        assert_eq!(new_path, "/app");
        assert_eq!(t.get(&lib).unwrap().path(), "/app/lib");

        let tracked = t.get_file(&tracked).unwrap();
        assert_eq!(tracked.path, "/app/lib/a.ts");
        assert_eq!(tracked.baseline_path, "/src/lib/a.ts");
        assert!(tracked.is_modified());

        let fresh = t.get_file(&fresh).unwrap();
        assert_eq!(fresh.baseline_path, "/app/lib/b.ts");
        assert!(t.get_entry_by_path("/src").is_none());
    }

    #[test]
    fn rename_back_is_clean() {
        let mut t = tree();
        let root = t.root_id().clone();
        let id = committed_file(&mut t, &root, "a.txt", "hi");
        t.rename_entry(&id, "b.txt").unwrap();
        assert!(t.get_file(&id).unwrap().flags.dirty);
        t.rename_entry(&id, "a.txt").unwrap();
        assert!(!t.get_file(&id).unwrap().flags.dirty);
    }

    #[test]
    fn rename_rejects_root_and_collisions() {
        let mut t = tree();
        let root = t.root_id().clone();
        let a = t.create_entry(&root, "a", EntryKind::File).unwrap();
        t.create_entry(&root, "b", EntryKind::File).unwrap();
        assert!(matches!(t.rename_entry(&root, "x"), Err(TreeError::RootImmutable)));
        assert!(matches!(t.rename_entry(&a, "b"), Err(TreeError::InvalidName { .. })));
        assert!(t.rename_entry(&a, "a").is_ok());
    }

    #[test]
    fn delete_untracked_file_removes_it() {
        let mut t = tree();
        let root = t.root_id().clone();
        let id = t.create_entry(&root, "a.txt", EntryKind::File).unwrap();
        let report = t.delete_entry(&id).unwrap();
        assert_eq!(report.removed, vec![id.clone()]);
        assert!(!t.contains(&id));
        assert!(t.visible_children(&root).is_empty());
    }

    #[test]
    fn delete_tracked_file_tombstones_it() {
        let mut t = tree();
        let root = t.root_id().clone();
        let id = committed_file(&mut t, &root, "a.txt", "hi");
        let report = t.delete_entry(&id).unwrap();
        assert_eq!(report.tombstoned, vec![id.clone()]);

        let file = t.get_file(&id).unwrap();
        assert!(file.is_pending_deletion());
        assert!(file.flags.hidden);
        assert!(file.content.is_empty());
        assert!(t.get_entry_by_path("/a.txt").is_none());
        assert!(matches!(t.delete_entry(&id), Err(TreeError::EntryNotFound(_))));
    }

    #[test]
    fn delete_directory_mixes_tombstones_and_removal() {
        let mut t = tree();
        let root = t.root_id().clone();
        let src = t.create_entry(&root, "src", EntryKind::Directory).unwrap();
        let empty = t.create_entry(&src, "empty", EntryKind::Directory).unwrap();
        let tracked = committed_file(&mut t, &src, "a.ts", "a");
        let fresh = t.create_entry(&src, "b.ts", EntryKind::File).unwrap();

        let report = t.delete_entry(&src).unwrap();
        assert!(report.removed.contains(&empty));
        assert!(report.removed.contains(&fresh));
        assert_eq!(report.tombstoned, vec![tracked.clone()]);

        let dir = t.get(&src).unwrap().as_directory().unwrap();
        assert!(dir.hidden);
        assert_eq!(dir.children, vec![tracked.clone()]);
        assert_eq!(t.collect_stageable_files(&src), vec![tracked]);
        assert!(t.visible_children(&root).is_empty());

        // mkdir of the same name revives the hidden directory
        let again = t.create_entry(&root, "src", EntryKind::Directory).unwrap();
        assert_eq!(again, src);
    }

    #[test]
    fn delete_directory_of_untracked_files_removes_it() {
        let mut t = tree();
        let root = t.root_id().clone();
        let src = t.create_entry(&root, "src", EntryKind::Directory).unwrap();
        t.create_entry(&src, "b.ts", EntryKind::File).unwrap();
        t.delete_entry(&src).unwrap();
        assert!(!t.contains(&src));
        assert_eq!(t.len(), 1);
        assert!(matches!(t.delete_entry(&root), Err(TreeError::RootImmutable)));
    }

    #[test]
    fn update_content_errors() {
        let mut t = tree();
        let root = t.root_id().clone();
        let dir = t.create_entry(&root, "d", EntryKind::Directory).unwrap();
        assert!(matches!(t.update_file_content(&dir, "x"), Err(TreeError::NotAFile(_))));
        assert!(matches!(
            t.update_file_content(&EntryId::from_raw("nope"), "x"),
            Err(TreeError::EntryNotFound(_))
        ));
    }

    #[test]
    fn ensure_directory_and_relocate() {
        let mut t = tree();
        let root = t.root_id().clone();
        let id = committed_file(&mut t, &root, "a.txt", "hi");
        t.rename_entry(&id, "b.txt").unwrap();

        t.relocate(&id, "/docs/deep/a.txt").unwrap();
        let file = t.get_file(&id).unwrap();
        assert_eq!(file.path, "/docs/deep/a.txt");
        assert!(t.get_entry_by_path("/docs/deep").is_some());
        assert_eq!(t.find_id_by_path("/docs/deep/a.txt"), Some(id));

        let err = t.ensure_directory("/docs/deep/a.txt/x").unwrap_err();
        assert!(matches!(err, TreeError::InvalidParent { .. }));
    }

    #[test]
    fn restore_unhides_ancestors() {
        let mut t = tree();
        let root = t.root_id().clone();
        let src = t.create_entry(&root, "src", EntryKind::Directory).unwrap();
        let id = committed_file(&mut t, &src, "a.ts", "a");
        t.delete_entry(&src).unwrap();
        assert!(t.get_entry_by_path("/src/a.ts").is_none());

        t.restore_file(&id, "a").unwrap();
        assert_eq!(t.find_id_by_path("/src/a.ts"), Some(id.clone()));
        let file = t.get_file(&id).unwrap();
        assert!(!file.flags.dirty && !file.flags.deleted);

        t.mark_absent(&id).unwrap();
        assert!(t.get_file(&id).unwrap().is_absent());
    }

    #[test]
    fn restore_refuses_to_unhide_over_a_visible_sibling() {
        let mut t = tree();
        let root = t.root_id().clone();
        let d = t.create_entry(&root, "d", EntryKind::Directory).unwrap();
        let x = committed_file(&mut t, &d, "x.txt", "x");
        t.delete_entry(&d).unwrap();
        let file_d = t.create_entry(&root, "d", EntryKind::File).unwrap();

        let err = t.restore_file(&x, "x").unwrap_err();
        assert!(matches!(err, TreeError::InvalidName { .. }));
        assert!(t.get(&d).unwrap().is_hidden());
        assert!(t.get_file(&x).unwrap().is_pending_deletion());
        assert_eq!(t.find_id_by_path("/d"), Some(file_d));
        let names: Vec<&str> = t.visible_children(&root).iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["d"]);
    }

    #[test]
    fn blocked_paths() {
        let mut t = tree();
        let root = t.root_id().clone();
        let src = t.create_entry(&root, "src", EntryKind::Directory).unwrap();
        t.create_entry(&src, "a.ts", EntryKind::File).unwrap();
        t.create_entry(&root, "notes", EntryKind::File).unwrap();

        assert!(t.is_path_blocked("/src/a.ts"));
        assert!(t.is_path_blocked("/src"));
        assert!(t.is_path_blocked("/notes/journal.md"));
        assert!(t.is_path_blocked("/"));
        assert!(!t.is_path_blocked("/src/b.ts"));
        assert!(!t.is_path_blocked("/docs/deep/c.md"));
    }

    #[test]
    fn hidden_files_do_not_block() {
        let mut t = tree();
        let root = t.root_id().clone();
        let a = committed_file(&mut t, &root, "a.txt", "a");
        t.hide_file(&a).unwrap();
        assert!(!t.is_path_blocked("/a.txt"));
        assert!(t.create_entry(&root, "a.txt", EntryKind::File).is_ok());
    }

    #[test]
    fn untrack_turns_a_moved_file_into_a_new_one() {
        let mut t = tree();
        let root = t.root_id().clone();
        let a = committed_file(&mut t, &root, "a.txt", "a");
        t.rename_entry(&a, "c.txt").unwrap();
        t.untrack_file(&a).unwrap();

        let file = t.get_file(&a).unwrap();
        assert!(file.is_untracked() && file.flags.dirty);
        assert_eq!(file.baseline_path, "/c.txt");
        assert_eq!(file.content, "a");

        t.delete_entry(&a).unwrap();
        assert!(!t.contains(&a));
    }

    #[test]
    fn insert_tracked_and_remove() {
        let mut t = tree();
        let id = t.insert_tracked_file("/notes/journal.md", "- [ ]").unwrap();
        let file = t.get_file(&id).unwrap();
        assert!(file.flags.tracked && !file.flags.dirty);
        assert_eq!(file.baseline_path, "/notes/journal.md");

        t.remove_file(&id).unwrap();
        assert!(t.get_entry_by_path("/notes/journal.md").is_none());
        assert!(t.get_entry_by_path("/notes").is_some());
    }

    #[test]
    fn serde_roundtrip() {
        let mut t = tree();
        let root = t.root_id().clone();
        committed_file(&mut t, &root, "a.txt", "hi");
        let json = serde_json::to_string(&t).unwrap();
        let back: EntryTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
