//! Remote sync adapter — wraps the `git` CLI for the working copy.
//!
//! Version control itself is an external collaborator: every operation here
//! shells out to `git` and classifies the result. The adapter owns exactly
//! two decisions of its own — the candidate-branch ladder and the
//! no-empty-commit guard.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::Utc;

use crate::error::{io_err, stderr_detail, SyncError};

/// Remote name consulted for fetch and push.
pub const REMOTE_NAME: &str = "origin";

/// Conventional branch names, tried in order; first success wins.
pub const BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Outcome of a fetch-and-merge attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Fetched and merged `origin/<branch>`.
    Merged { branch: &'static str },
    /// No remote configured — nothing to fetch.
    SkippedNoRemote,
}

/// Outcome of publishing the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Change set was empty; no commit created, nothing pushed.
    NothingToPublish,
    /// Committed and pushed `origin/<branch>`.
    Pushed { branch: &'static str },
    /// Committed locally; no remote configured, publishing skipped.
    SkippedNoRemote,
}

/// One line of recent history, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub hash: String,
    pub age: String,
    pub summary: String,
}

// ---------------------------------------------------------------------------
// GitRepo
// ---------------------------------------------------------------------------

/// Handle on the version-controlled working copy.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Open the working copy at `root`.
    ///
    /// This is the environment check that runs before any phase: the
    /// directory must exist and be the top level of a git working copy
    /// (a parent repository does not count).
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SyncError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SyncError::NotAWorkingCopy { path: root });
        }

        let repo = Self { root };
        let output = repo.run(&["rev-parse", "--show-toplevel"])?;
        if !output.status.success() {
            return Err(SyncError::NotAWorkingCopy {
                path: repo.root.clone(),
            });
        }

        let toplevel = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        let toplevel = toplevel
            .canonicalize()
            .map_err(|e| io_err(&toplevel, e))?;
        let canonical_root = repo
            .root
            .canonicalize()
            .map_err(|e| io_err(&repo.root, e))?;
        if toplevel != canonical_root {
            return Err(SyncError::NotAWorkingCopy {
                path: repo.root.clone(),
            });
        }

        Ok(repo)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run git inside the working copy, capturing output.
    fn run(&self, args: &[&str]) -> Result<Output, SyncError> {
        tracing::debug!("git {}", args.join(" "));
        Command::new("git")
            .arg("-C")
            .arg(&self.root)
            .args(args)
            .output()
            .map_err(SyncError::GitSpawn)
    }

    /// Run git and require a zero exit status, returning stdout.
    fn run_checked(&self, action: &'static str, args: &[&str]) -> Result<String, SyncError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(SyncError::Git {
                action,
                detail: stderr_detail(&output),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Whether a remote named `origin` is configured.
    pub fn remote_configured(&self) -> Result<bool, SyncError> {
        let remotes = self.run_checked("remote", &["remote"])?;
        Ok(remotes.lines().any(|line| line.trim() == REMOTE_NAME))
    }

    /// Whether the change set (staged, unstaged, or untracked) is non-empty.
    pub fn has_pending_changes(&self) -> Result<bool, SyncError> {
        Ok(!self.pending_changes()?.is_empty())
    }

    /// Pending entries in porcelain form.
    pub fn pending_changes(&self) -> Result<Vec<String>, SyncError> {
        let status = self.run_checked("status", &["status", "--porcelain"])?;
        Ok(status
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Fetch-and-merge the latest remote state.
    ///
    /// Tries each entry of [`BRANCH_CANDIDATES`] in turn and stops at the
    /// first success. Absence of a remote is a reported skip, not a failure;
    /// exhausting the ladder is fatal.
    pub fn fetch_latest(&self) -> Result<FetchOutcome, SyncError> {
        if !self.remote_configured()? {
            tracing::debug!("no remote configured; fetch skipped");
            return Ok(FetchOutcome::SkippedNoRemote);
        }

        let mut attempts = Vec::new();
        for branch in BRANCH_CANDIDATES {
            let output = self.run(&["pull", "--no-rebase", REMOTE_NAME, branch])?;
            if output.status.success() {
                tracing::info!("merged {REMOTE_NAME}/{branch}");
                return Ok(FetchOutcome::Merged { branch });
            }
            attempts.push(format!("{branch}: {}", stderr_detail(&output)));
        }
        Err(SyncError::AllBranchesFailed {
            action: "fetch",
            attempts: attempts.join("; "),
        })
    }

    /// Commit all pending changes, then push over the branch ladder.
    ///
    /// An empty change set creates no commit and pushes nothing. Without a
    /// remote the commit stays local and publishing reports as skipped —
    /// local-only history is a valid terminal state for an offline device.
    pub fn publish(&self, message: &str) -> Result<PublishOutcome, SyncError> {
        if !self.has_pending_changes()? {
            tracing::debug!("change set empty; nothing to publish");
            return Ok(PublishOutcome::NothingToPublish);
        }

        self.run_checked("add", &["add", "--all"])?;
        self.run_checked("commit", &["commit", "--message", message])?;

        if !self.remote_configured()? {
            tracing::info!("committed locally; no remote configured, push skipped");
            return Ok(PublishOutcome::SkippedNoRemote);
        }

        let mut attempts = Vec::new();
        for branch in BRANCH_CANDIDATES {
            let output = self.run(&["push", REMOTE_NAME, branch])?;
            if output.status.success() {
                tracing::info!("pushed {REMOTE_NAME}/{branch}");
                return Ok(PublishOutcome::Pushed { branch });
            }
            attempts.push(format!("{branch}: {}", stderr_detail(&output)));
        }
        Err(SyncError::AllBranchesFailed {
            action: "push",
            attempts: attempts.join("; "),
        })
    }

    /// Recent history, newest first. Empty for a repo with no commits yet.
    pub fn recent_history(&self, limit: usize) -> Result<Vec<HistoryEntry>, SyncError> {
        if !self.run(&["rev-parse", "--verify", "HEAD"])?.status.success() {
            return Ok(Vec::new());
        }
        let count = limit.to_string();
        let log = self.run_checked(
            "log",
            &["log", "-n", &count, "--pretty=format:%h%x09%cr%x09%s"],
        )?;
        Ok(log.lines().filter_map(parse_history_line).collect())
    }

    /// Number of commits reachable from HEAD; 0 before the first commit.
    pub fn commit_count(&self) -> Result<usize, SyncError> {
        if !self.run(&["rev-parse", "--verify", "HEAD"])?.status.success() {
            return Ok(0);
        }
        let count = self.run_checked("rev-list", &["rev-list", "--count", "HEAD"])?;
        count
            .trim()
            .parse()
            .map_err(|_| SyncError::Git {
                action: "rev-list",
                detail: format!("unparseable commit count: {}", count.trim()),
            })
    }
}

fn parse_history_line(line: &str) -> Option<HistoryEntry> {
    let mut parts = line.splitn(3, '\t');
    Some(HistoryEntry {
        hash: parts.next()?.to_string(),
        age: parts.next()?.to_string(),
        summary: parts.next().unwrap_or("").to_string(),
    })
}

// ---------------------------------------------------------------------------
// Commit message
// ---------------------------------------------------------------------------

/// Auto-generated commit message identifying the originating host and time.
pub fn commit_message() -> String {
    format!(
        "attune: update from {} at {}",
        host_name(),
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    )
}

fn host_name() -> String {
    let from_cmd = Command::new("hostname")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|name| !name.is_empty());

    from_cmd
        .or_else(|| std::env::var("HOSTNAME").ok())
        .or_else(|| std::env::var("COMPUTERNAME").ok())
        .unwrap_or_else(|| "unknown-host".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
