//! Human-readable activity timeline.
//!
//! Engine operations append events describing what happened; a UI or the
//! REPL reads them back. Events from a failed operation are never appended.

use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use sprout_types::Timestamp;

/// Classification of timeline events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A shell command such as `ls` or `open`.
    Command,
    /// A change to the working tree.
    Edit,
    /// Guidance shown to the user, e.g. a scenario being loaded.
    Hint,
    /// A git operation.
    Git,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Command => "command",
            Self::Edit => "edit",
            Self::Hint => "hint",
            Self::Git => "git",
        };
        write!(f, "{s}")
    }
}

/// A single timeline entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Sequence number assigned by the sink; `0` until appended.
    pub id: u64,
    pub kind: EventKind,
    pub label: String,
    pub detail: Option<String>,
    pub timestamp: Timestamp,
}

impl TimelineEvent {
    pub fn new(kind: EventKind, label: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind,
            label: label.into(),
            detail: None,
            timestamp: Timestamp::now(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl fmt::Display for TimelineEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.format_clock(),
            self.kind,
            self.label
        )?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Destination for timeline events.
pub trait TimelineSink: Send + Sync {
    /// Record an event.
    fn append(&mut self, event: TimelineEvent);

    /// All retained events, oldest first.
    fn events(&self) -> Vec<TimelineEvent>;

    /// The `limit` most recent events, oldest first.
    fn recent(&self, limit: usize) -> Vec<TimelineEvent> {
        let mut events = self.events();
        let skip = events.len().saturating_sub(limit);
        events.drain(..skip);
        events
    }
}

/// Bounded in-memory timeline. The oldest event is evicted once the
/// capacity is reached.
#[derive(Clone, Debug)]
pub struct Timeline {
    capacity: usize,
    events: VecDeque<TimelineEvent>,
    next_id: u64,
}

impl Timeline {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            events: VecDeque::with_capacity(capacity),
            next_id: 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(100)
    }
}

impl TimelineSink for Timeline {
    fn append(&mut self, mut event: TimelineEvent) {
        if self.capacity == 0 {
            return;
        }
        event.id = self.next_id;
        self.next_id += 1;
        while self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn events(&self) -> Vec<TimelineEvent> {
        self.events.iter().cloned().collect()
    }
}
