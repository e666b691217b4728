//! Attune — keep an AI agent CLI's configuration in tune across machines.
//!
//! # Usage
//!
//! ```text
//! attune pull                  fetch the latest store state and apply it
//! attune push                  capture local state into the store and publish
//! attune sync                  pull, apply, then save (pull-before-push)
//! attune status [--json] [--limit N]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::status::StatusArgs;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "attune",
    version,
    about = "Keep agent CLI configuration in sync across machines",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the latest store state and apply it to the runtime directory.
    Pull,

    /// Capture runtime state into the store, commit, and publish.
    Push,

    /// Pull and apply the latest state, then capture and publish local changes.
    Sync,

    /// Show working-copy changes and recent history.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Pull => commands::pull::run(),
        Commands::Push => commands::push::run(),
        Commands::Sync => commands::sync::run(),
        Commands::Status(args) => args.run(),
    }
}
