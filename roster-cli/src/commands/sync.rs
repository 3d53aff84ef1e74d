//! `roster sync`: reconcile the registry against the upstream projects tree.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use roster_sync::{
    pipeline::{self, SyncOptions},
    SyncReport,
};

use super::{home, ConfigArgs};

/// Arguments for `roster sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Show what would change without writing to the registry.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let home = home()?;
        let config = self.config.resolve(&home)?;

        let report = pipeline::run(
            &config,
            &home,
            &SyncOptions {
                dry_run: self.dry_run,
            },
        )
        .context("sync failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize sync report")?
            );
            return Ok(());
        }

        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    let prefix = if report.dry_run { "[dry-run] " } else { "" };
    let plan = &report.plan;

    if plan.is_noop() {
        println!(
            "{prefix}{} registry up to date ({} projects)",
            "✓".green().bold(),
            plan.unchanged.len()
        );
        return;
    }

    println!(
        "{prefix}{} registry synced ({} added, {} removed, {} unchanged)",
        "✓".green().bold(),
        plan.to_add.len(),
        plan.to_remove.len(),
        plan.unchanged.len()
    );
    for name in &plan.to_add {
        println!("  {}  {name}", "+".green());
    }
    for name in &plan.to_remove {
        println!("  {}  {name}", "-".red());
    }
}
