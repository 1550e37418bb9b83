use thiserror::Error;

use sprout_types::ErrorKind;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("not a git repository (or any of the parent directories): .git")]
    NotARepository,

    #[error("Aborting commit due to empty commit message.")]
    EmptyMessage,

    #[error("nothing added to commit (use \"git add\" to stage changes)")]
    NothingStaged,

    #[error("cannot commit in detached HEAD state; create a branch first")]
    DetachedHeadCommit,

    #[error("not a valid object name: '{0}' has no commits yet")]
    NoCommitsYet(String),

    #[error("'{0}' did not match any branch or commit")]
    RefNotFound(String),

    #[error("{0} is not a file")]
    NotAFile(String),

    #[error("no such entry: {0}")]
    EntryNotFound(String),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    #[error("no such task: {0}")]
    UnknownTask(String),

    #[error("no such hint: {0}")]
    UnknownHint(String),

    #[error("engine lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Tree(#[from] sprout_tree::TreeError),

    #[error(transparent)]
    Index(#[from] sprout_index::IndexError),

    #[error(transparent)]
    Ref(#[from] sprout_refs::RefError),

    #[error(transparent)]
    Sync(#[from] sprout_sync::SyncError),

    #[error(transparent)]
    Store(#[from] sprout_store::StoreError),

    #[error(transparent)]
    Dag(#[from] sprout_dag::DagError),
}

impl EngineError {
    /// The user-facing classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotARepository => ErrorKind::NotARepository,
            Self::EmptyMessage => ErrorKind::EmptyMessage,
            Self::NothingStaged => ErrorKind::NothingStaged,
            Self::DetachedHeadCommit => ErrorKind::DetachedHeadCommit,
            Self::NoCommitsYet(_) => ErrorKind::NoCommitsYet,
            Self::RefNotFound(_) => ErrorKind::RefNotFound,
            Self::NotAFile(_) => ErrorKind::NotAFile,
            Self::EntryNotFound(_)
            | Self::UnknownScenario(_)
            | Self::UnknownTask(_)
            | Self::UnknownHint(_) => ErrorKind::EntryNotFound,
            Self::LockPoisoned => ErrorKind::Internal,
            Self::Tree(err) => err.kind(),
            Self::Index(err) => err.kind(),
            Self::Ref(err) => err.kind(),
            Self::Sync(err) => err.kind(),
            Self::Store(err) => err.kind(),
            Self::Dag(err) => err.kind(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
