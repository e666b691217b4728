//! `attune status` — working-copy visibility.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use attune_sync::StatusReport;

use super::open_orchestrator;

/// Arguments for `attune status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    /// Number of history entries to show.
    #[arg(long, default_value_t = 8)]
    pub limit: usize,
}

#[derive(Serialize)]
struct StatusJson {
    store: String,
    remote_configured: bool,
    pending: Vec<String>,
    history: Vec<HistoryJson>,
}

#[derive(Serialize)]
struct HistoryJson {
    hash: String,
    age: String,
    summary: String,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "commit")]
    hash: String,
    #[tabled(rename = "age")]
    age: String,
    #[tabled(rename = "message")]
    summary: String,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let orchestrator = open_orchestrator()?;
        let report = orchestrator.status(self.limit).context("status failed")?;

        if self.json {
            print_json(report)?;
            return Ok(());
        }
        print_human(report);
        Ok(())
    }
}

fn print_json(report: StatusReport) -> Result<()> {
    let payload = StatusJson {
        store: report.repo_root.display().to_string(),
        remote_configured: report.remote_configured,
        pending: report.pending,
        history: report
            .recent
            .into_iter()
            .map(|entry| HistoryJson {
                hash: entry.hash,
                age: entry.age,
                summary: entry.summary,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_human(report: StatusReport) {
    let remote = if report.remote_configured {
        "origin".green().to_string()
    } else {
        "none (local only)".yellow().to_string()
    };
    println!(
        "attune v{} | store {} | remote: {}",
        env!("CARGO_PKG_VERSION"),
        report.repo_root.display(),
        remote,
    );

    if report.pending.is_empty() {
        println!("{}", "Working copy clean.".green());
    } else {
        let noun = if report.pending.len() == 1 {
            "change"
        } else {
            "changes"
        };
        println!("{} pending {noun}:", report.pending.len());
        for line in &report.pending {
            println!("  {}", line.yellow());
        }
        println!("Run 'attune push' to publish them.");
    }

    if report.recent.is_empty() {
        println!("No commits yet.");
        return;
    }
    let rows: Vec<HistoryRow> = report
        .recent
        .into_iter()
        .map(|entry| HistoryRow {
            hash: entry.hash,
            age: entry.age,
            summary: entry.summary,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
