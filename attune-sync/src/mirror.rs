//! Mirror engine — one-way directory reconciliation.
//!
//! After [`mirror`] returns, the destination holds exactly the source's
//! entries and content; anything present only in the destination is removed.
//! An absent or empty source is a deliberate skip, never a deletion signal,
//! so an unpopulated category cannot wipe an existing destination.

use std::fmt;
use std::fs;
use std::path::Path;
use std::process::Command;

use crate::error::{io_err, stderr_detail, SyncError};

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How [`mirror`] realises its postcondition. Both variants are equivalent
/// from the caller's perspective; they differ in whether unchanged files are
/// rewritten and in the window left by an interrupted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorStrategy {
    /// Incremental `rsync --delete`; unchanged files are left untouched.
    Rsync,
    /// Destructive fallback: remove the destination, then copy in full.
    Replace,
}

impl MirrorStrategy {
    /// Probe the execution environment: rsync when available, the
    /// destructive fallback otherwise.
    pub fn detect() -> Self {
        let available = Command::new("rsync")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if available {
            Self::Rsync
        } else {
            Self::Replace
        }
    }
}

impl fmt::Display for MirrorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsync => write!(f, "rsync"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

// ---------------------------------------------------------------------------
// mirror
// ---------------------------------------------------------------------------

/// Outcome of a mirror call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Destination now matches the source exactly.
    Mirrored,
    /// Source absent or empty — destination left untouched.
    SkippedEmptySource,
}

/// Make `dest` exactly reflect `source`.
pub fn mirror(
    source: &Path,
    dest: &Path,
    strategy: MirrorStrategy,
) -> Result<MirrorOutcome, SyncError> {
    if !has_entries(source)? {
        tracing::debug!("mirror skipped, empty source: {}", source.display());
        return Ok(MirrorOutcome::SkippedEmptySource);
    }

    match strategy {
        MirrorStrategy::Rsync => mirror_rsync(source, dest)?,
        MirrorStrategy::Replace => mirror_replace(source, dest)?,
    }

    tracing::info!(
        "mirrored ({strategy}): {} -> {}",
        source.display(),
        dest.display()
    );
    Ok(MirrorOutcome::Mirrored)
}

fn has_entries(dir: &Path) -> Result<bool, SyncError> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    Ok(entries.next().is_some())
}

fn mirror_rsync(source: &Path, dest: &Path) -> Result<(), SyncError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    // Trailing slash: transfer the source's contents, not the directory itself.
    let mut from = source.as_os_str().to_os_string();
    from.push("/");

    let output = Command::new("rsync")
        .args(["-a", "--delete", "--"])
        .arg(&from)
        .arg(dest)
        .output()
        .map_err(SyncError::RsyncSpawn)?;

    if !output.status.success() {
        return Err(SyncError::Rsync {
            src: source.to_path_buf(),
            dest: dest.to_path_buf(),
            detail: stderr_detail(&output),
        });
    }
    Ok(())
}

fn mirror_replace(source: &Path, dest: &Path) -> Result<(), SyncError> {
    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|e| io_err(dest, e))?;
    }
    copy_tree(source, dest)
}

fn copy_tree(source: &Path, dest: &Path) -> Result<(), SyncError> {
    fs::create_dir_all(dest).map_err(|e| io_err(dest, e))?;
    for entry in fs::read_dir(source).map_err(|e| io_err(source, e))? {
        let entry = entry.map_err(|e| io_err(source, e))?;
        let from = entry.path();
        let to = dest.join(entry.file_name());
        if entry.file_type().map_err(|e| io_err(&from, e))?.is_dir() {
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| io_err(&from, e))?;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
