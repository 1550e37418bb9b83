//! Working tree edits and UI selection.

use tracing::debug;

use sprout_tree::{DeleteReport, Entry, EntryKind};
use sprout_types::{CommitId, EntryId};

use super::Engine;
use crate::error::{EngineError, EngineResult};
use crate::guide::Hint;
use crate::scenario::{self, ScenarioInfo};
use crate::timeline::EventKind;

impl Engine {
    // ---------------------------------------------------------------
    // Tree edits
    // ---------------------------------------------------------------

    /// Create a file or directory under `parent`.
    pub fn create_entry(&mut self, parent: &EntryId, name: &str, kind: EntryKind) -> EngineResult<EntryId> {
        self.transact(|txn| {
            let id = txn.state.tree.create_entry(parent, name, kind)?;
            let path = txn
                .state
                .tree
                .get(&id)
                .map(|entry| entry.path().to_string())
                .unwrap_or_default();
            txn.record(EventKind::Edit, format!("Created {kind} {path}"));
            Ok(id)
        })
    }

    /// Rename an entry in place. Returns the new path.
    pub fn rename_entry(&mut self, id: &EntryId, new_name: &str) -> EngineResult<String> {
        self.transact(|txn| {
            let old = txn
                .state
                .tree
                .get(id)
                .map(|entry| entry.path().to_string())
                .unwrap_or_default();
            let new = txn.state.tree.rename_entry(id, new_name)?;
            txn.record_detail(EventKind::Edit, format!("Renamed {old}"), new.clone());
            Ok(new)
        })
    }

    /// Delete an entry; removed ids leave the staging area and the selection.
    pub fn delete_entry(&mut self, id: &EntryId) -> EngineResult<DeleteReport> {
        self.transact(|txn| {
            let report = txn.state.tree.delete_entry(id)?;
            if let Some(repo) = txn.state.repo.as_mut() {
                repo.staging.retain(|staged| !report.removed.contains(staged));
            }
            txn.state.deselect(&report.removed);
            txn.state.deselect(&report.tombstoned);
            txn.record(EventKind::Edit, format!("Deleted {}", report.path));
            Ok(report)
        })
    }

    /// Replace a file's content.
    pub fn update_file_content(&mut self, id: &EntryId, content: impl Into<String>) -> EngineResult<()> {
        let content = content.into();
        self.transact(|txn| {
            txn.state.tree.update_file_content(id, content)?;
            let path = txn
                .state
                .tree
                .get(id)
                .map(|entry| entry.path().to_string())
                .unwrap_or_default();
            txn.record(EventKind::Edit, format!("Edited {path}"));
            Ok(())
        })
    }

    // ---------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------

    /// Open a visible file in the editor.
    pub fn select_file(&mut self, id: &EntryId) -> EngineResult<()> {
        self.transact(|txn| {
            let path = match txn.state.tree.get(id) {
                Some(Entry::File(file)) if file.is_visible() => file.path.clone(),
                Some(Entry::Directory(dir)) if !dir.hidden => {
                    return Err(EngineError::NotAFile(dir.path.clone()))
                }
                _ => return Err(EngineError::EntryNotFound(id.to_string())),
            };
            txn.state.active_file = Some(id.clone());
            txn.record(EventKind::Command, format!("Opened {path}"));
            Ok(())
        })
    }

    /// Highlight a commit in the history view.
    pub fn set_active_commit(&mut self, id: &CommitId) -> EngineResult<()> {
        self.transact(|txn| {
            let repo = txn.state.repo()?;
            let summary = repo
                .history
                .commit(id)
                .map(|commit| commit.summary().to_string())
                .ok_or_else(|| EngineError::RefNotFound(id.to_string()))?;
            txn.state.active_commit = Some(id.clone());
            txn.record_detail(EventKind::Git, format!("Selected commit {id}"), summary);
            Ok(())
        })
    }

    // ---------------------------------------------------------------
    // Scenarios
    // ---------------------------------------------------------------

    /// Replace the whole state with a catalog scenario.
    pub fn load_scenario(&mut self, id: &str) -> EngineResult<&'static ScenarioInfo> {
        let info = scenario::find(id).ok_or_else(|| EngineError::UnknownScenario(id.to_string()))?;
        self.transact(|txn| {
            txn.state = scenario::build(info.id, txn.config)?;
            txn.record_detail(EventKind::Hint, format!("Loaded scenario {}", info.title), info.summary);
            Ok(())
        })?;
        debug!(scenario = info.id, "scenario loaded");
        Ok(info)
    }

    pub fn scenario_catalog(&self) -> &'static [ScenarioInfo] {
        scenario::CATALOG
    }

    // ---------------------------------------------------------------
    // Tasks and hints
    // ---------------------------------------------------------------

    /// Flip a task's done flag and return the new value.
    pub fn toggle_task(&mut self, id: &str) -> EngineResult<bool> {
        let done = self.transact(|txn| {
            let task = txn
                .state
                .tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| EngineError::UnknownTask(id.to_string()))?;
            task.done = !task.done;
            Ok(task.done)
        })?;
        debug!(task = id, done, "task toggled");
        Ok(done)
    }

    /// Open a hint and note it on the timeline.
    pub fn view_hint(&mut self, id: &str) -> EngineResult<Hint> {
        self.transact(|txn| {
            let hint = txn
                .state
                .hints
                .iter()
                .find(|hint| hint.id == id)
                .cloned()
                .ok_or_else(|| EngineError::UnknownHint(id.to_string()))?;
            txn.state.active_hint = Some(hint.id.clone());
            txn.record(EventKind::Hint, format!("Viewed hint: {}", hint.title));
            Ok(hint)
        })
    }
}
