//! Roster core library: domain types, name validation and configuration.
//!
//! - [`types`]: [`ProjectName`] newtype and the persisted [`Project`] record
//! - [`config`]: `~/.roster/config.yaml` load / validate
//! - [`error`]: [`ConfigError`]

pub mod config;
pub mod error;
pub mod types;

pub use config::{AuthConfig, Config, RetryConfig, SourceConfig, StoreConfig};
pub use error::ConfigError;
pub use types::{Project, ProjectName, MARKER_FILE};
