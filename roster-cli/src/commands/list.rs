//! `roster list`: show the registry contents.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use roster_sync::pipeline;

use super::{home, ConfigArgs};

/// Arguments for `roster list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "project")]
    name: String,
    #[tabled(rename = "created")]
    created: String,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let home = home()?;
        let config = self.config.resolve(&home)?;
        let store = pipeline::open_store(&config, &home);
        let projects = store
            .list()
            .with_context(|| format!("failed to read registry {}", store.root().display()))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&projects).context("failed to serialize registry")?
            );
            return Ok(());
        }

        if projects.is_empty() {
            println!("Registry is empty. Run `roster sync` to populate it.");
            return Ok(());
        }

        println!(
            "{} {} projects in {}",
            "Registry".bold(),
            projects.len(),
            store.root().display()
        );
        let rows: Vec<ProjectRow> = projects
            .into_iter()
            .map(|p| ProjectRow {
                name: p.name.to_string(),
                created: p.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
