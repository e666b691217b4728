//! # attune-sync
//!
//! Reconciliation engine: mirror engine, config file transfer, git remote
//! adapter, and the orchestrator that sequences them into the `pull`,
//! `push`, `sync`, and `status` commands.
//!
//! Call [`Orchestrator::open`] with a resolved [`attune_core::Layout`]; the
//! orchestrator returns step reports and leaves all presentation to the CLI.

pub mod error;
pub mod git;
pub mod mirror;
pub mod orchestrator;
pub mod transfer;

pub use error::SyncError;
pub use git::{FetchOutcome, GitRepo, HistoryEntry, PublishOutcome};
pub use mirror::{mirror, MirrorOutcome, MirrorStrategy};
pub use orchestrator::{
    CommandReport, Direction, Orchestrator, StatusReport, StepOutcome,
};
pub use transfer::{transfer_inbound, transfer_outbound, InboundOutcome, OutboundOutcome};
