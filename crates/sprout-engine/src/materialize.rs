//! Rewrite the working tree to match a snapshot.
//!
//! Shared by checkout, hard reset, and pull. Tracked files are restored,
//! relocated, or turned into absent tombstones; snapshot paths with no
//! tracked entry get new files. Untracked entries are never touched.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use sprout_store::Snapshot;
use sprout_types::EntryId;

use crate::error::EngineResult;
use crate::state::EngineState;

/// What a materialization changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Tracked files whose content now matches the snapshot.
    pub restored: usize,
    /// Files created for snapshot paths the tree did not have.
    pub created: usize,
    /// Tracked files that do not exist in the snapshot.
    pub absent: usize,
    /// Snapshot paths left alone because an untracked entry occupies them.
    pub skipped: Vec<String>,
}

pub(crate) fn materialize(
    state: &mut EngineState,
    snapshot: &Snapshot,
) -> EngineResult<MaterializeReport> {
    let mut report = MaterializeReport::default();
    let mut claimed: BTreeSet<String> = BTreeSet::new();

    // Live files claim their baseline before tombstones sharing it.
    let mut tracked: Vec<(EntryId, String, bool)> = state
        .tree
        .files()
        .filter(|file| file.flags.tracked)
        .map(|file| (file.id.clone(), file.baseline_path.clone(), file.flags.deleted))
        .collect();
    tracked.sort_by_key(|(_, _, deleted)| *deleted);

    let mut placements: Vec<(EntryId, String, &str)> = Vec::new();
    let mut gone = Vec::new();
    for (id, baseline, _) in tracked {
        match snapshot.get(&baseline) {
            Some(content) if !claimed.contains(&baseline) => {
                claimed.insert(baseline.clone());
                placements.push((id, baseline, content));
            }
            _ => {
                state.tree.mark_absent(&id)?;
                report.absent += 1;
                gone.push(id);
            }
        }
    }

    // Tracked files step out of the way first so a file can move onto a
    // path another tracked file is about to leave.
    for (id, _, _) in &placements {
        state.tree.hide_file(id)?;
    }
    for (id, baseline, content) in placements {
        if state.tree.is_path_blocked(&baseline) {
            warn!(path = %baseline, "path occupied by an untracked entry; not restored");
            state.tree.mark_absent(&id)?;
            report.skipped.push(baseline);
            gone.push(id);
            continue;
        }
        state.tree.relocate(&id, &baseline)?;
        state.tree.restore_file(&id, content)?;
        report.restored += 1;
    }
    state.deselect(&gone);

    for (path, content) in snapshot.iter() {
        if claimed.contains(path) {
            continue;
        }
        if state.tree.is_path_blocked(path) {
            warn!(path, "path occupied by an untracked entry; not created");
            report.skipped.push(path.to_string());
            continue;
        }
        match state.tree.insert_tracked_file(path, content) {
            Ok(_) => report.created += 1,
            Err(err) => {
                warn!(path, error = %err, "snapshot path could not be created");
                report.skipped.push(path.to_string());
            }
        }
    }

    debug!(
        restored = report.restored,
        created = report.created,
        absent = report.absent,
        skipped = report.skipped.len(),
        "snapshot materialized"
    );
    Ok(report)
}
