//! Reconciliation orchestrator — phase sequencing behind the user commands.
//!
//! Each command is a fixed, ordered composition of phases:
//!
//! - `pull`   = Pull (fetch) → Apply (store → runtime)
//! - `push`   = Save (runtime → store, then publish)
//! - `sync`   = Pull → Apply → Save — pull-before-push is mandatory, so
//!   local state is reconciled against the latest remote state before it is
//!   captured and republished
//! - `status` = read-only; runs no phases, mutates nothing
//!
//! Phases run sequentially and abort on the first fatal error; steps already
//! completed are not rolled back. The orchestrator returns step reports and
//! never prints — presentation belongs to the CLI.

use std::path::PathBuf;

use attune_core::Layout;

use crate::error::SyncError;
use crate::git::{commit_message, FetchOutcome, GitRepo, HistoryEntry, PublishOutcome};
use crate::mirror::{mirror, MirrorOutcome, MirrorStrategy};
use crate::transfer::{transfer_inbound, transfer_outbound, InboundOutcome, OutboundOutcome};

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// Which way a mirror step moved data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// store → runtime (Apply phase).
    Apply,
    /// runtime → store (Save phase).
    Capture,
}

/// One completed step, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Fetched { branch: &'static str },
    FetchSkippedNoRemote,
    Mirrored { name: &'static str, direction: Direction },
    MirrorSkipped { name: &'static str, direction: Direction },
    Installed { name: &'static str, backup: Option<PathBuf> },
    InstallSkipped { name: &'static str },
    Captured { name: &'static str },
    CaptureSkipped { name: &'static str },
    Pushed { branch: &'static str },
    PublishSkippedNoRemote,
    NothingToPublish,
}

/// Steps completed by one mutating command.
#[derive(Debug, Default)]
pub struct CommandReport {
    pub steps: Vec<StepOutcome>,
}

/// Read-only snapshot produced by `status`.
#[derive(Debug)]
pub struct StatusReport {
    pub repo_root: PathBuf,
    pub remote_configured: bool,
    pub pending: Vec<String>,
    pub recent: Vec<HistoryEntry>,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Sequences the mirror engine, config transfers, and the git adapter.
#[derive(Debug)]
pub struct Orchestrator {
    layout: Layout,
    repo: GitRepo,
    strategy: MirrorStrategy,
}

impl Orchestrator {
    /// Open the working copy and probe the mirroring strategy.
    pub fn open(layout: Layout) -> Result<Self, SyncError> {
        Self::with_strategy(layout, MirrorStrategy::detect())
    }

    /// Open with an explicit strategy. The property tests drive both
    /// variants through the same suite.
    pub fn with_strategy(layout: Layout, strategy: MirrorStrategy) -> Result<Self, SyncError> {
        let repo = GitRepo::open(layout.repo_root.clone())?;
        Ok(Self {
            layout,
            repo,
            strategy,
        })
    }

    pub fn strategy(&self) -> MirrorStrategy {
        self.strategy
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// `pull` — Pull phase, then Apply phase.
    pub fn pull(&self) -> Result<CommandReport, SyncError> {
        let mut report = CommandReport::default();
        self.pull_phase(&mut report)?;
        self.apply_phase(&mut report)?;
        Ok(report)
    }

    /// `push` — Save phase only.
    pub fn push(&self) -> Result<CommandReport, SyncError> {
        let mut report = CommandReport::default();
        self.save_phase(&mut report)?;
        Ok(report)
    }

    /// `sync` — Pull, Apply, then Save.
    pub fn sync(&self) -> Result<CommandReport, SyncError> {
        let mut report = CommandReport::default();
        self.pull_phase(&mut report)?;
        self.apply_phase(&mut report)?;
        self.save_phase(&mut report)?;
        Ok(report)
    }

    /// `status` — read-only working-copy snapshot.
    pub fn status(&self, history_limit: usize) -> Result<StatusReport, SyncError> {
        Ok(StatusReport {
            repo_root: self.layout.repo_root.clone(),
            remote_configured: self.repo.remote_configured()?,
            pending: self.repo.pending_changes()?,
            recent: self.repo.recent_history(history_limit)?,
        })
    }

    /// Phase Pull — repository ← remote.
    fn pull_phase(&self, report: &mut CommandReport) -> Result<(), SyncError> {
        let step = match self.repo.fetch_latest()? {
            FetchOutcome::Merged { branch } => StepOutcome::Fetched { branch },
            FetchOutcome::SkippedNoRemote => StepOutcome::FetchSkippedNoRemote,
        };
        report.steps.push(step);
        Ok(())
    }

    /// Phase Apply — runtime ← repository.
    fn apply_phase(&self, report: &mut CommandReport) -> Result<(), SyncError> {
        for target in self.layout.sync_targets() {
            let step = match mirror(&target.repo_dir, &target.runtime_dir, self.strategy)? {
                MirrorOutcome::Mirrored => StepOutcome::Mirrored {
                    name: target.name,
                    direction: Direction::Apply,
                },
                MirrorOutcome::SkippedEmptySource => StepOutcome::MirrorSkipped {
                    name: target.name,
                    direction: Direction::Apply,
                },
            };
            report.steps.push(step);
        }
        for file in self.layout.config_files() {
            let step = match transfer_inbound(&file)? {
                InboundOutcome::Installed { backup } => StepOutcome::Installed {
                    name: file.name,
                    backup,
                },
                InboundOutcome::SkippedMissingSource => {
                    StepOutcome::InstallSkipped { name: file.name }
                }
            };
            report.steps.push(step);
        }
        Ok(())
    }

    /// Phase Save — repository ← runtime, then remote ← repository.
    fn save_phase(&self, report: &mut CommandReport) -> Result<(), SyncError> {
        for file in self.layout.config_files() {
            let step = match transfer_outbound(&file)? {
                OutboundOutcome::Captured => StepOutcome::Captured { name: file.name },
                OutboundOutcome::SkippedMissingSource => {
                    StepOutcome::CaptureSkipped { name: file.name }
                }
            };
            report.steps.push(step);
        }
        for target in self.layout.sync_targets() {
            let step = match mirror(&target.runtime_dir, &target.repo_dir, self.strategy)? {
                MirrorOutcome::Mirrored => StepOutcome::Mirrored {
                    name: target.name,
                    direction: Direction::Capture,
                },
                MirrorOutcome::SkippedEmptySource => StepOutcome::MirrorSkipped {
                    name: target.name,
                    direction: Direction::Capture,
                },
            };
            report.steps.push(step);
        }

        let step = match self.repo.publish(&commit_message())? {
            PublishOutcome::NothingToPublish => StepOutcome::NothingToPublish,
            PublishOutcome::Pushed { branch } => StepOutcome::Pushed { branch },
            PublishOutcome::SkippedNoRemote => StepOutcome::PublishSkippedNoRemote,
        };
        report.steps.push(step);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
