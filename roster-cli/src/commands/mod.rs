pub mod discover;
pub mod list;
pub mod sync;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use roster_core::{config, Config, SourceConfig};

/// Flags shared by every command that reads configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Config file to use instead of `~/.roster/config.yaml`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read projects from a local checkout instead of the configured source.
    #[arg(long, value_name = "CHECKOUT")]
    pub local: Option<PathBuf>,

    /// Path of the projects directory inside the source.
    #[arg(long, value_name = "PATH")]
    pub projects_path: Option<String>,

    /// Registry directory to use instead of the configured one.
    #[arg(long, value_name = "DIR")]
    pub store: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the config file, then apply command-line overrides.
    pub fn resolve(&self, home: &Path) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => config::load_at(home).context("failed to load ~/.roster/config.yaml")?,
        };

        if let Some(checkout) = &self.local {
            config.source = SourceConfig::Local {
                checkout: checkout.clone(),
                projects_path: config.source.projects_path().to_string(),
            };
        }
        if let Some(path) = &self.projects_path {
            match &mut config.source {
                SourceConfig::Github { projects_path, .. }
                | SourceConfig::Local { projects_path, .. } => *projects_path = path.clone(),
            }
        }
        if let Some(store) = &self.store {
            config.store.root = Some(store.clone());
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

pub fn home() -> Result<PathBuf> {
    Ok(config::home()?)
}
