//! Entry types for the working tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sprout_types::{EntryId, Timestamp};

/// Kind of entry to create.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(Self::File),
            "dir" | "directory" | "folder" => Ok(Self::Directory),
            other => Err(format!("unknown entry kind: {other}")),
        }
    }
}

/// A node in the working tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    Directory(DirectoryEntry),
    File(FileEntry),
}

impl Entry {
    pub fn id(&self) -> &EntryId {
        match self {
            Self::Directory(dir) => &dir.id,
            Self::File(file) => &file.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Directory(dir) => &dir.name,
            Self::File(file) => &file.name,
        }
    }

    /// Parent directory id. `None` only for the root.
    pub fn parent(&self) -> Option<&EntryId> {
        match self {
            Self::Directory(dir) => dir.parent.as_ref(),
            Self::File(file) => Some(&file.parent),
        }
    }

    /// Derived absolute path, e.g. `/src/main.ts`.
    pub fn path(&self) -> &str {
        match self {
            Self::Directory(dir) => &dir.path,
            Self::File(file) => &file.path,
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            Self::Directory(dir) => dir.hidden,
            Self::File(file) => file.flags.hidden,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Directory(_) => EntryKind::Directory,
            Self::File(_) => EntryKind::File,
        }
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    pub fn as_file_mut(&mut self) -> Option<&mut FileEntry> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryEntry> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    pub fn as_directory_mut(&mut self) -> Option<&mut DirectoryEntry> {
        match self {
            Self::Directory(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Self::Directory(dir) => dir.name = name,
            Self::File(file) => file.name = name,
        }
    }

    pub(crate) fn set_path(&mut self, path: String) {
        match self {
            Self::Directory(dir) => dir.path = path,
            Self::File(file) => file.path = path,
        }
    }
}

/// A directory node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: EntryId,
    pub name: String,
    pub parent: Option<EntryId>,
    pub path: String,
    /// Ordered child ids. The single source of truth for membership.
    pub children: Vec<EntryId>,
    /// Soft-deleted: still holds tombstoned descendants.
    pub hidden: bool,
}

/// Bookkeeping flags for a file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFlags {
    /// The file has been part of at least one commit.
    pub tracked: bool,
    /// The file differs from its last sync point.
    pub dirty: bool,
    /// Tombstoned: tracked but removed from the working tree.
    pub deleted: bool,
    /// Not shown and not addressable by path.
    pub hidden: bool,
}

/// A file node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: EntryId,
    pub name: String,
    pub parent: EntryId,
    pub path: String,
    pub content: String,
    /// Content at the last sync point (commit, checkout, or reset).
    pub initial_content: String,
    /// Path as last committed; the key used for snapshot lookups.
    pub baseline_path: String,
    pub flags: FileFlags,
    pub last_edited: Option<Timestamp>,
}

impl FileEntry {
    /// A fresh, never-committed file.
    pub(crate) fn untracked(id: EntryId, name: String, parent: EntryId, path: String) -> Self {
        Self {
            id,
            name,
            parent,
            baseline_path: path.clone(),
            path,
            content: String::new(),
            initial_content: String::new(),
            flags: FileFlags {
                tracked: false,
                dirty: true,
                deleted: false,
                hidden: false,
            },
            last_edited: None,
        }
    }

    /// A clean file materialized from history.
    pub(crate) fn tracked(
        id: EntryId,
        name: String,
        parent: EntryId,
        path: String,
        content: String,
    ) -> Self {
        Self {
            id,
            name,
            parent,
            baseline_path: path.clone(),
            path,
            initial_content: content.clone(),
            content,
            flags: FileFlags {
                tracked: true,
                ..FileFlags::default()
            },
            last_edited: None,
        }
    }

    pub fn is_untracked(&self) -> bool {
        !self.flags.tracked
    }

    /// Tracked, changed, and still present.
    pub fn is_modified(&self) -> bool {
        self.flags.tracked && self.flags.dirty && !self.flags.deleted
    }

    /// Deleted in the working tree but not yet committed as such.
    pub fn is_pending_deletion(&self) -> bool {
        self.flags.tracked && self.flags.deleted && self.flags.dirty
    }

    /// Tombstone that matches HEAD: the path does not exist at the checked-out commit.
    pub fn is_absent(&self) -> bool {
        self.flags.tracked && self.flags.deleted && !self.flags.dirty
    }

    /// Hidden without being a tombstone. Nothing to stage.
    pub fn is_hidden_only(&self) -> bool {
        self.flags.hidden && !self.flags.deleted
    }

    /// Whether the file is visible and addressable.
    pub fn is_visible(&self) -> bool {
        !self.flags.hidden
    }

    /// Was renamed or moved since its last commit.
    pub fn is_relocated(&self) -> bool {
        self.path != self.baseline_path
    }

    /// Path shown in staging reports: the baseline for tombstones.
    pub fn display_path(&self) -> &str {
        if self.flags.deleted {
            &self.baseline_path
        } else {
            &self.path
        }
    }

    /// Recompute `dirty` from content and location.
    ///
    /// Untracked files are always dirty. Tombstones keep their flag.
    pub fn refresh_dirty(&mut self) {
        if !self.flags.tracked {
            self.flags.dirty = true;
            self.baseline_path = self.path.clone();
        } else if !self.flags.deleted {
            self.flags.dirty = self.content != self.initial_content || self.is_relocated();
        }
    }

    /// Record that the current state is now committed.
    ///
    /// A pending deletion becomes an absent tombstone.
    pub fn mark_committed(&mut self) {
        self.flags.tracked = true;
        self.flags.dirty = false;
        if !self.flags.deleted {
            self.baseline_path = self.path.clone();
            self.initial_content = self.content.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> FileEntry {
        FileEntry::untracked(
            EntryId::from_raw("f1"),
            "a.txt".into(),
            EntryId::root(),
            "/a.txt".into(),
        )
    }

    #[test]
    fn new_file_is_untracked_and_dirty() {
        let f = file();
        assert!(f.is_untracked());
        assert!(f.flags.dirty);
        assert_eq!(f.baseline_path, "/a.txt");
    }

    #[test]
    fn refresh_dirty_tracks_content_and_path() {
        let mut f = file();
        f.content = "hi".into();
        f.mark_committed();
        assert!(!f.flags.dirty);

        f.content = "bye".into();
        f.refresh_dirty();
        assert!(f.is_modified());

        f.content = "hi".into();
        f.refresh_dirty();
        assert!(!f.flags.dirty);

        f.path = "/b.txt".into();
        f.refresh_dirty();
        assert!(f.flags.dirty);
        assert_eq!(f.baseline_path, "/a.txt");
    }

    #[test]
    fn committed_deletion_becomes_absent() {
        let mut f = file();
        f.mark_committed();
        f.flags.deleted = true;
        f.flags.hidden = true;
        f.flags.dirty = true;
        assert!(f.is_pending_deletion());
        assert_eq!(f.display_path(), "/a.txt");

        f.mark_committed();
        assert!(f.is_absent());
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("dir".parse::<EntryKind>().unwrap(), EntryKind::Directory);
        assert_eq!("file".parse::<EntryKind>().unwrap(), EntryKind::File);
        assert!("link".parse::<EntryKind>().is_err());
    }

    #[test]
    fn entry_serializes_with_type_tag() {
        let entry = Entry::File(file());
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "file");
        let back: Entry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
