//! Error types for attune-sync.

use std::path::PathBuf;
use std::process::Output;

use thiserror::Error;

/// All errors that can arise from reconciliation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store directory is absent or not under version control.
    #[error("not a version-controlled working copy: {path} (create or clone your store first)")]
    NotAWorkingCopy { path: PathBuf },

    /// The `git` binary could not be spawned at all.
    #[error("failed to run git: {0}")]
    GitSpawn(#[source] std::io::Error),

    /// A git command exited non-zero.
    #[error("git {action} failed: {detail}")]
    Git {
        action: &'static str,
        detail: String,
    },

    /// Every candidate branch was tried and all failed.
    #[error("git {action} failed for every candidate branch: {attempts}")]
    AllBranchesFailed {
        action: &'static str,
        attempts: String,
    },

    /// The `rsync` binary could not be spawned despite probing as available.
    #[error("failed to run rsync: {0}")]
    RsyncSpawn(#[source] std::io::Error),

    /// rsync exited non-zero while mirroring.
    #[error("rsync failed mirroring {src} to {dest}: {detail}")]
    Rsync {
        src: PathBuf,
        dest: PathBuf,
        detail: String,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}

/// Last non-empty stderr line of a finished subprocess, for error details.
pub(crate) fn stderr_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    stderr
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("(no stderr output)")
        .trim()
        .to_string()
}
