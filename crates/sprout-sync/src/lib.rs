//! Remote synchronization for Sprout.
//!
//! Remotes are in-process copies of (partial) histories with their own branch
//! maps. Push and fetch move commits together with their snapshots and never
//! rewrite existing history on either side: the receiving graph only grows.
//! There is no merge; the engine's pull overwrites the local branch pointer.

pub mod error;
pub mod history;
pub mod negotiation;
pub mod registry;
pub mod remote;
pub mod types;

pub use error::{SyncError, SyncResult};
pub use history::History;
pub use negotiation::NegotiationEngine;
pub use registry::RemoteRegistry;
pub use remote::Remote;
pub use types::{FetchResult, MergeStatus, PullResult, PushResult, RefUpdate};
