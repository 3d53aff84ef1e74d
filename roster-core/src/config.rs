//! Roster configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.roster/
//!   config.yaml        (optional, defaults apply when absent)
//!   registry/
//!     <project>.yaml   (one record per project, see roster-store)
//! ```
//!
//! # API pattern
//!
//! Loaders take an explicit home (`fn_at(home: &Path, …)`) so tests can point
//! them at a `TempDir`. The binary resolves the real one once with [`home`].
//!
//! Tests must NEVER call [`home`]; always pass a home to the `_at` loaders.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

// ---------------------------------------------------------------------------
// 1. Config types
// ---------------------------------------------------------------------------

/// Root of `~/.roster/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub retry: RetryConfig,
}

/// Where the `projects/` tree is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// GitHub contents API.
    Github {
        #[serde(default = "default_owner")]
        owner: String,
        #[serde(default = "default_repo")]
        repo: String,
        #[serde(default = "default_branch")]
        branch: String,
        #[serde(default = "default_projects_path")]
        projects_path: String,
        #[serde(default = "default_api_url")]
        api_url: String,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    /// A checkout on the local filesystem.
    Local {
        checkout: PathBuf,
        #[serde(default = "default_projects_path")]
        projects_path: String,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::Github {
            owner: default_owner(),
            repo: default_repo(),
            branch: default_branch(),
            projects_path: default_projects_path(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    pub fn projects_path(&self) -> &str {
        match self {
            SourceConfig::Github { projects_path, .. } => projects_path,
            SourceConfig::Local { projects_path, .. } => projects_path,
        }
    }
}

/// Credentials for the GitHub source. `file` wins over `env` when both are set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            env: DEFAULT_TOKEN_ENV.to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StoreConfig {
    /// Registry directory. `~/` is expanded against home; `None` means
    /// `~/.roster/registry`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

/// Backoff settings for per-record store operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 200,
            max_delay_ms: 5_000,
        }
    }
}

fn default_owner() -> String {
    "google".to_string()
}
fn default_repo() -> String {
    "oss-fuzz".to_string()
}
fn default_branch() -> String {
    "master".to_string()
}
fn default_projects_path() -> String {
    "projects".to_string()
}
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.roster/`
pub fn roster_dir_at(home: &Path) -> PathBuf {
    home.join(".roster")
}

/// `<home>/.roster/config.yaml`. Pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    roster_dir_at(home).join("config.yaml")
}

/// `<home>/.roster/registry/`
pub fn default_store_root_at(home: &Path) -> PathBuf {
    roster_dir_at(home).join("registry")
}

impl StoreConfig {
    /// Resolve the registry directory against `home`.
    pub fn resolve_root(&self, home: &Path) -> PathBuf {
        match &self.root {
            Some(root) => expand_home(root, home),
            None => default_store_root_at(home),
        }
    }
}

fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Load `<home>/.roster/config.yaml`, or defaults if the file is absent.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    load_from(&path)
}

/// Load an explicit config file. Unlike [`load_at`], a missing file is an error.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    config.validate()?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// 4. Validate
// ---------------------------------------------------------------------------

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let SourceConfig::Github {
            owner,
            repo,
            branch,
            api_url,
            ..
        } = &self.source
        {
            for (field, value) in [
                ("source.owner", owner),
                ("source.repo", repo),
                ("source.branch", branch),
                ("source.api_url", api_url),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!("{field} must not be empty")));
                }
            }
        }
        if self.source.projects_path().trim_matches('/').is_empty() {
            return Err(ConfigError::Invalid(
                "source.projects_path must not be empty".to_string(),
            ));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// The user's home directory, from `dirs::home_dir()`.
pub fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
