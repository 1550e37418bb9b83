//! The Sprout version-control playground engine.
//!
//! One [`Engine`] owns an in-memory working tree, commit history, refs,
//! staging area and remotes. Operations are atomic: a failed call leaves
//! the engine exactly as it was. [`porcelain`] maps git-style command
//! lines onto engine operations and renders git-style output.

pub mod config;
mod engine;
pub mod error;
pub mod guide;
pub mod handle;
mod materialize;
pub mod porcelain;
pub mod scenario;
pub mod state;
pub mod timeline;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use guide::{Hint, Task};
pub use handle::SharedEngine;
pub use materialize::MaterializeReport;
pub use porcelain::{render_error, run_line_args, CommandOutput};
pub use scenario::{ScenarioInfo, CATALOG};
pub use state::{EngineState, Repository};
pub use timeline::{EventKind, Timeline, TimelineEvent, TimelineSink};
pub use types::{CheckoutOutcome, CommitSummary, InitOutcome, RemoteInfo, ResetOutcome};

// Re-export the lower-level types callers need to drive the engine.
pub use sprout_dag::Commit;
pub use sprout_index::{FileStatus, StatusEntry, WorkdirStatus};
pub use sprout_refs::{BranchInfo, Head, TrackingRef};
pub use sprout_sync::{FetchResult, MergeStatus, PullResult, PushResult, RefUpdate};
pub use sprout_tree::{DeleteReport, Entry, EntryKind, EntryTree, FileEntry};
pub use sprout_types::{CommitId, EntryId, ErrorKind, Timestamp};
