use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use sprout_types::CommitId;

use crate::error::{StoreError, StoreResult};
use crate::snapshot::Snapshot;

/// Commit id -> snapshot association. Insert-once, never deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotStore {
    snapshots: BTreeMap<CommitId, Snapshot>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Associate `snapshot` with `id`. Fails if `id` already has one.
    pub fn insert(&mut self, id: CommitId, snapshot: Snapshot) -> StoreResult<()> {
        if self.snapshots.contains_key(&id) {
            return Err(StoreError::DuplicateSnapshot(id));
        }
        debug!(commit = %id, files = snapshot.len(), "snapshot stored");
        self.snapshots.insert(id, snapshot);
        Ok(())
    }

    pub fn get(&self, id: &CommitId) -> Option<&Snapshot> {
        self.snapshots.get(id)
    }

    /// Like [`get`](Self::get), but a missing snapshot is an error.
    pub fn require(&self, id: &CommitId) -> StoreResult<&Snapshot> {
        self.snapshots
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &CommitId) -> bool {
        self.snapshots.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &CommitId> {
        self.snapshots.keys()
    }
}
