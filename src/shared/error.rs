use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// A run that finds nothing to report is still a success; only argument,
/// configuration and pipeline failures produce a non-zero code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed (with or without findings)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Configuration, feed, reconciliation or publish failure
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Failure to acquire or release a volume snapshot.
///
/// Volume-scoped: the pipeline logs it and moves on to the next volume.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to create snapshot for volume {volume}\nDetails: {details}")]
    Create {
        volume: PathBuf,
        /// Mount link that may have been left behind before the failure
        partial_mount: Option<PathBuf>,
        details: String,
    },

    #[error("Failed to release snapshot {snapshot_id} mounted at {mount_path}\nDetails: {details}")]
    Release {
        mount_path: PathBuf,
        snapshot_id: String,
        details: String,
    },
}

impl SnapshotError {
    /// Mount path left behind by a failed create, if any.
    pub fn partial_mount(&self) -> Option<&PathBuf> {
        match self {
            SnapshotError::Create { partial_mount, .. } => partial_mount.as_ref(),
            SnapshotError::Release { .. } => None,
        }
    }
}

/// Failure of the external inventory scanner for one mount path.
///
/// Volume-scoped, like [`SnapshotError`].
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to launch scanner {scanner}: {source}")]
    Launch {
        scanner: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Scanner exited with {status} while scanning {mount_path}\nStderr: {stderr}")]
    NonZeroExit {
        mount_path: PathBuf,
        status: String,
        stderr: String,
    },

    #[error("Scanner produced malformed output for {mount_path}: {source}")]
    MalformedOutput {
        mount_path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Scan fixture unavailable: {path}\nDetails: {details}")]
    Fixture { path: PathBuf, details: String },
}

/// Failure while assembling the known-vulnerability feed.
///
/// Fatal to the run: a partial feed is never handed to reconciliation.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Vulnerability feed request failed on page {page}: {details}")]
    Request { page: usize, details: String },

    #[error("Vulnerability feed returned status {status} on page {page}: {body}")]
    Status { page: usize, status: u16, body: String },

    #[error("Vulnerability feed query rejected on page {page}: {messages}")]
    Query { page: usize, messages: String },

    #[error("Failed to decode vulnerability feed page {page}: {details}")]
    Decode { page: usize, details: String },

    #[error("Vulnerability feed pagination broke on page {page}: {details}")]
    Pagination { page: usize, details: String },

    #[error("Vulnerability feed fixture unavailable: {path}\nDetails: {details}")]
    Fixture { path: PathBuf, details: String },
}

/// Contract violation inside the reconciliation engine.
///
/// Well-formed inputs never produce this.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    #[error("Vulnerability record #{index} is malformed: {reason}")]
    MalformedRecord { index: usize, reason: String },
}

/// Failure to serialize, stage or upload the findings payload.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to serialize upload payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to stage payload file: {0}")]
    Staging(#[source] std::io::Error),

    #[error("Upload rejected: {details}")]
    Upload { details: String },

    #[error("Failed to write payload to {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    Destination { path: PathBuf, details: String },
}

/// Invalid or incomplete run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required setting: {field}\n\n💡 Hint: Pass --{flag} or set `{field}` in the config file")]
    Missing { field: &'static str, flag: &'static str },

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
