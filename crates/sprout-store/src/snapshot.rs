use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sprout_tree::EntryTree;

/// Immutable baseline-path to content map.
///
/// Cloning a snapshot is cheap: the map is shared. [`Snapshot::derive`]
/// produces a new map and leaves the original untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Arc<BTreeMap<String, String>>);

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_map(files: BTreeMap<String, String>) -> Self {
        Self(Arc::new(files))
    }

    /// Project every tracked, non-deleted file to baseline path -> content.
    pub fn build(tree: &EntryTree) -> Self {
        let files = tree
            .files()
            .filter(|file| file.flags.tracked && !file.flags.deleted)
            .map(|file| (file.baseline_path.clone(), file.content.clone()))
            .collect();
        Self::from_map(files)
    }

    /// A new snapshot holding this one's files with `edit` applied.
    pub fn derive(&self, edit: impl FnOnce(&mut BTreeMap<String, String>)) -> Self {
        let mut files = self.0.as_ref().clone();
        edit(&mut files);
        Self::from_map(files)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Paths in lexical order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(path, content)| (path.as_str(), content.as_str()))
    }

    /// Whether two snapshots share the same underlying map.
    pub fn shares_storage(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
