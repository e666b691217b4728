//! Config file transfer — single-file overwrite semantics.
//!
//! Payloads are opaque bytes; nothing here parses or merges them. The
//! runtime side keeps a single backup slot, refreshed before every inbound
//! overwrite; the repository side is protected by git history alone.

use std::fs;
use std::path::PathBuf;

use attune_core::layout::ConfigFile;

use crate::error::{io_err, SyncError};

/// Outcome of an inbound (store → runtime) transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundOutcome {
    /// Runtime file replaced; `backup` holds the pre-transfer content when
    /// the runtime file pre-existed.
    Installed { backup: Option<PathBuf> },
    /// The store has no copy of this file — expected on a fresh device.
    SkippedMissingSource,
}

/// Outcome of an outbound (runtime → store) transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundOutcome {
    /// Store file created or overwritten with the runtime content.
    Captured,
    /// No runtime file to capture.
    SkippedMissingSource,
}

/// Install the store's copy into the runtime location, backing up the
/// previous runtime content first.
pub fn transfer_inbound(file: &ConfigFile) -> Result<InboundOutcome, SyncError> {
    if !file.repo_path.is_file() {
        tracing::debug!("{} not in store; install skipped", file.name);
        return Ok(InboundOutcome::SkippedMissingSource);
    }

    let backup = if file.runtime_path.is_file() {
        let backup = file.backup_path();
        fs::copy(&file.runtime_path, &backup).map_err(|e| io_err(&backup, e))?;
        Some(backup)
    } else {
        None
    };

    if let Some(parent) = file.runtime_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    fs::copy(&file.repo_path, &file.runtime_path)
        .map_err(|e| io_err(&file.runtime_path, e))?;

    tracing::info!("installed {}: {}", file.name, file.runtime_path.display());
    Ok(InboundOutcome::Installed { backup })
}

/// Capture the runtime copy into the store. No backup outbound.
pub fn transfer_outbound(file: &ConfigFile) -> Result<OutboundOutcome, SyncError> {
    if !file.runtime_path.is_file() {
        tracing::debug!("{} absent at runtime; capture skipped", file.name);
        return Ok(OutboundOutcome::SkippedMissingSource);
    }

    if let Some(parent) = file.repo_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    fs::copy(&file.runtime_path, &file.repo_path).map_err(|e| io_err(&file.repo_path, e))?;

    tracing::info!("captured {}: {}", file.name, file.repo_path.display());
    Ok(OutboundOutcome::Captured)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
