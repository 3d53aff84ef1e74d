//! Error types for roster-catalog.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain a credential for the catalog source.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("no access token available: {origin} is not set")]
    Missing { origin: String },

    #[error("access token from {origin} is empty")]
    Empty { origin: String },

    #[error("failed to read access token at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// All errors that can arise while reading the upstream tree.
///
/// Every variant is fatal for a pass: the target set would be incomplete.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("authentication failed: {0}")]
    Auth(#[from] TokenError),

    #[error("catalog source rejected credentials (HTTP {status}) for '{path}'")]
    Unauthorized { status: u16, path: String },

    #[error("catalog source unavailable for '{path}': {reason}")]
    Unavailable { path: String, reason: String },

    #[error("projects root '{path}' not found or not a directory")]
    RootNotFound { path: String },

    #[error("listing of '{path}' was truncated by the catalog source")]
    Truncated { path: String },

    #[error("failed to decode catalog response for '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`CatalogError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.into(),
        source,
    }
}
