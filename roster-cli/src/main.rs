//! Roster: project registry reconciliation CLI.
//!
//! # Usage
//!
//! ```text
//! roster sync [--dry-run] [--json] [--config <file>] [--local <checkout>] [--store <dir>]
//! roster discover [--json] [--config <file>] [--local <checkout>]
//! roster list [--json] [--config <file>] [--store <dir>]
//! ```
//!
//! Exit status is non-zero whenever a pass fails; the error chain goes to
//! stderr.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{discover::DiscoverArgs, list::ListArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "roster",
    version,
    about = "Keep a project registry in step with an upstream projects/ tree",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile the registry against the upstream projects tree.
    Sync(SyncArgs),

    /// Print the projects currently found upstream, without touching the registry.
    Discover(DiscoverArgs),

    /// Print the projects currently in the registry.
    List(ListArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Discover(args) => args.run(),
        Commands::List(args) => args.run(),
    }
}

/// Log to stderr so `--json` output on stdout stays parseable.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
