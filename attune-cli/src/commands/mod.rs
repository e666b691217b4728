//! Per-command modules and shared wiring.

pub mod pull;
pub mod push;
pub mod report;
pub mod status;
pub mod sync;

use anyhow::{Context, Result};

use attune_core::Layout;
use attune_sync::Orchestrator;

/// Resolve the fixed layout once and open the working copy.
pub(crate) fn open_orchestrator() -> Result<Orchestrator> {
    let layout = Layout::discover().context("could not determine home directory")?;
    Orchestrator::open(layout).context("failed to open the attune store")
}
