//! Shared sync pipeline entrypoint used by the CLI.
//!
//! Order of a pass, each step fatal on failure:
//! 1. credentials (GitHub source only);
//! 2. projects root;
//! 3. target set discovery;
//! 4. reconcile (or plan only, for a dry run).
//!
//! Nothing touches the store before step 4.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use roster_catalog::{
    discover_projects, CatalogError, EnvTokenProvider, FileTokenProvider, GithubClient,
    GithubSettings, LocalEntry, TokenProvider,
};
use roster_core::{AuthConfig, Config, ProjectName, SourceConfig};
use roster_store::{RegistryStore, RetryPolicy, YamlStore};

use crate::{Reconciler, SyncError, SyncReport};

/// Knobs for a single pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Compute the diff without writing to the registry.
    pub dry_run: bool,
}

/// Token provider for the configured credentials. A file wins over env.
pub fn token_provider(auth: &AuthConfig) -> Box<dyn TokenProvider> {
    match &auth.file {
        Some(path) => Box::new(FileTokenProvider::new(path)),
        None => Box::new(EnvTokenProvider::new(&auth.env)),
    }
}

/// The durable store the config points at.
pub fn open_store(config: &Config, home: &Path) -> YamlStore {
    YamlStore::new(config.store.resolve_root(home)).with_retry(RetryPolicy::from(&config.retry))
}

/// Discover the target set from the configured source.
pub fn discover(config: &Config) -> Result<BTreeSet<ProjectName>, SyncError> {
    discover_with(config, token_provider(&config.auth).as_ref())
}

/// [`discover`] with an explicit token provider.
pub fn discover_with(
    config: &Config,
    tokens: &dyn TokenProvider,
) -> Result<BTreeSet<ProjectName>, SyncError> {
    match &config.source {
        SourceConfig::Github {
            owner,
            repo,
            branch,
            projects_path,
            api_url,
            timeout_secs,
        } => {
            let token = tokens.token().map_err(CatalogError::from)?;
            let client = Arc::new(GithubClient::new(
                GithubSettings {
                    api_url: api_url.clone(),
                    owner: owner.clone(),
                    repo: repo.clone(),
                    branch: branch.clone(),
                    timeout: Duration::from_secs(*timeout_secs),
                },
                token,
            ));
            tracing::info!(
                %owner,
                %repo,
                %branch,
                path = %projects_path,
                "reading projects from GitHub"
            );
            let root = client.root(projects_path)?;
            Ok(discover_projects(&root)?)
        }
        SourceConfig::Local {
            checkout,
            projects_path,
        } => {
            tracing::info!(
                checkout = %checkout.display(),
                path = %projects_path,
                "reading projects from local checkout"
            );
            let root = LocalEntry::open(checkout, projects_path)?;
            Ok(discover_projects(&root)?)
        }
    }
}

/// Run one full pass against the configured source and store.
pub fn run(config: &Config, home: &Path, options: &SyncOptions) -> Result<SyncReport, SyncError> {
    config.validate()?;
    let target = discover(config)?;
    reconcile(&target, open_store(config, home), options)
}

/// Reconcile an already-computed target set against `store`.
pub fn reconcile<S: RegistryStore>(
    target: &BTreeSet<ProjectName>,
    store: S,
    options: &SyncOptions,
) -> Result<SyncReport, SyncError> {
    let mut reconciler = Reconciler::new(store);
    if options.dry_run {
        reconciler.dry_run(target)
    } else {
        reconciler.sync(target)
    }
}
