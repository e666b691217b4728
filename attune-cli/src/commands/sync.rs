//! `attune sync` — pull and apply the latest state, then capture and publish.

use anyhow::{Context, Result};

use super::{open_orchestrator, report::print_report};

pub fn run() -> Result<()> {
    let orchestrator = open_orchestrator()?;
    let report = orchestrator.sync().context("sync failed")?;
    print_report("sync", &report);
    Ok(())
}
