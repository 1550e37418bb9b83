use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sprout_types::CommitId;

use crate::history::History;

/// A named remote repository held in memory.
///
/// Populated only by push; read by fetch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remote {
    pub name: String,
    pub url: String,
    pub branches: BTreeMap<String, CommitId>,
    pub history: History,
}

impl Remote {
    /// An empty remote: no commits, no branches.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            branches: BTreeMap::new(),
            history: History::new(),
        }
    }

    pub fn branch(&self, name: &str) -> Option<&CommitId> {
        self.branches.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.history.commits.is_empty()
    }
}
