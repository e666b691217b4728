//! `attune pull` — fetch the latest store state and apply it.

use anyhow::{Context, Result};

use super::{open_orchestrator, report::print_report};

pub fn run() -> Result<()> {
    let orchestrator = open_orchestrator()?;
    let report = orchestrator.pull().context("pull failed")?;
    print_report("pull", &report);
    Ok(())
}
