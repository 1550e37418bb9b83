use sprout_types::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("'{0}' does not appear to be a remote repository")]
    RemoteNotFound(String),

    #[error("remote {0} already exists")]
    RemoteExists(String),

    #[error("src refspec {0} does not match any branch")]
    BranchNotFound(String),

    #[error("branch {0} has no commits yet")]
    UnbornBranch(String),

    #[error("couldn't find remote ref {branch} on {remote}")]
    RemoteBranchNotFound { remote: String, branch: String },

    #[error(transparent)]
    Ref(#[from] sprout_refs::RefError),

    #[error(transparent)]
    Dag(#[from] sprout_dag::DagError),

    #[error(transparent)]
    Store(#[from] sprout_store::StoreError),
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RemoteNotFound(_) => ErrorKind::RemoteNotFound,
            Self::RemoteExists(_) => ErrorKind::RemoteExists,
            Self::BranchNotFound(_) | Self::RemoteBranchNotFound { .. } => ErrorKind::RefNotFound,
            Self::UnbornBranch(_) => ErrorKind::NoCommitsYet,
            Self::Ref(err) => err.kind(),
            Self::Dag(err) => err.kind(),
            Self::Store(err) => err.kind(),
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
