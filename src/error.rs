use std::path::PathBuf;

/// Failure of a remote collaborator, classified by which backend produced it.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("cloudwatch logs: {0}")]
    Logs(String),
    #[error("ec2: {0}")]
    Compute(String),
    #[error("smtp: {0}")]
    Smtp(String),
    #[error("invalid message: {0}")]
    Message(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DiskError {
    #[error("statvfs failed for {path}: {source}")]
    Statvfs {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },
    #[error("filesystem at {0} reports zero total size")]
    EmptyFilesystem(PathBuf),
}
