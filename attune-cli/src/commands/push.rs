//! `attune push` — capture runtime state into the store and publish.

use anyhow::{Context, Result};

use super::{open_orchestrator, report::print_report};

pub fn run() -> Result<()> {
    let orchestrator = open_orchestrator()?;
    let report = orchestrator.push().context("push failed")?;
    print_report("push", &report);
    Ok(())
}
