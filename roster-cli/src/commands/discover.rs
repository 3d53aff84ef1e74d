//! `roster discover`: print the upstream target set.

use anyhow::{Context, Result};
use clap::Args;

use roster_sync::pipeline;

use super::{home, ConfigArgs};

/// Arguments for `roster discover`.
#[derive(Args, Debug)]
pub struct DiscoverArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Emit the names as a JSON array.
    #[arg(long)]
    pub json: bool,
}

impl DiscoverArgs {
    pub fn run(self) -> Result<()> {
        let config = self.config.resolve(&home()?)?;
        let names = pipeline::discover(&config).context("discovery failed")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&names).context("failed to serialize project names")?
            );
            return Ok(());
        }

        for name in &names {
            println!("{name}");
        }
        Ok(())
    }
}
