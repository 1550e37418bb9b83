//! The engine object.
//!
//! [`Engine`] owns one [`EngineState`] value. Every mutating operation runs
//! as a transaction: the state is cloned, the operation edits the clone,
//! and only on success is the clone published with a single assignment and
//! its timeline events flushed. A failed operation leaves no trace.

mod branches;
mod commits;
mod remotes;
mod worktree;

use tracing::debug;

use sprout_tree::{Entry, EntryTree};
use sprout_types::{CommitId, EntryId};

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::guide::{Hint, Task};
use crate::scenario;
use crate::state::{EngineState, Repository};
use crate::timeline::{EventKind, Timeline, TimelineEvent, TimelineSink};

/// A state being edited by one operation, plus the events it will emit.
pub(crate) struct Transaction<'a> {
    pub(crate) state: EngineState,
    pub(crate) config: &'a EngineConfig,
    events: Vec<TimelineEvent>,
}

impl<'a> Transaction<'a> {
    fn new(state: EngineState, config: &'a EngineConfig) -> Self {
        Self {
            state,
            config,
            events: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, kind: EventKind, label: impl Into<String>) {
        self.events.push(TimelineEvent::new(kind, label));
    }

    pub(crate) fn record_detail(
        &mut self,
        kind: EventKind,
        label: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.events
            .push(TimelineEvent::new(kind, label).with_detail(detail));
    }

    fn finish(self) -> (EngineState, Vec<TimelineEvent>) {
        (self.state, self.events)
    }
}

/// The version-control playground engine.
pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    timeline: Box<dyn TimelineSink>,
}

impl Engine {
    /// Create an engine positioned at the configured starting scenario.
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        let state = scenario::build(&config.starting_scenario, &config)?;
        Ok(Self::with_state(config, state))
    }

    /// Create an engine around an existing state, e.g. one loaded from disk.
    pub fn with_state(config: EngineConfig, state: EngineState) -> Self {
        let timeline = Box::new(Timeline::new(config.timeline_capacity));
        Self::with_sink(config, state, timeline)
    }

    /// Create an engine that reports to a custom timeline sink.
    pub fn with_sink(
        config: EngineConfig,
        state: EngineState,
        timeline: Box<dyn TimelineSink>,
    ) -> Self {
        Self {
            config,
            state,
            timeline,
        }
    }

    pub(crate) fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut Transaction<'_>) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let mut txn = Transaction::new(self.state.clone(), &self.config);
        let output = op(&mut txn)?;
        let (state, events) = txn.finish();
        self.state = state;
        debug!(events = events.len(), "state published");
        for event in events {
            self.timeline.append(event);
        }
        Ok(output)
    }

    // ---------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    /// Consume the engine, keeping only its state.
    pub fn into_state(self) -> EngineState {
        self.state
    }

    pub fn tree(&self) -> &EntryTree {
        &self.state.tree
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.state.repo.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    pub fn timeline(&self) -> &dyn TimelineSink {
        self.timeline.as_ref()
    }

    pub fn active_file(&self) -> Option<&EntryId> {
        self.state.active_file.as_ref()
    }

    pub fn active_commit(&self) -> Option<&CommitId> {
        self.state.active_commit.as_ref()
    }

    pub fn scenario_id(&self) -> &str {
        &self.state.scenario
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn hints(&self) -> &[Hint] {
        &self.state.hints
    }

    /// The hint last opened with `view_hint`.
    pub fn active_hint(&self) -> Option<&Hint> {
        let id = self.state.active_hint.as_ref()?;
        self.state.hints.iter().find(|hint| &hint.id == id)
    }

    /// The commit HEAD resolves to, if any.
    pub fn head_commit(&self) -> Option<CommitId> {
        self.state.repo.as_ref().and_then(Repository::head_commit)
    }

    /// The visible entry at `path`, if any.
    pub fn get_entry_by_path(&self, path: &str) -> Option<&Entry> {
        self.state.tree.get_entry_by_path(path)
    }

    /// Append a caller-supplied event to the timeline.
    pub fn log_event(&mut self, kind: EventKind, label: impl Into<String>, detail: Option<String>) {
        let mut event = TimelineEvent::new(kind, label);
        event.detail = detail;
        self.timeline.append(event);
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
