//! Error types for roster-sync.

use thiserror::Error;

use roster_catalog::CatalogError;
use roster_core::ConfigError;
use roster_store::StoreError;

/// All errors that can end a reconciliation pass.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The target set could not be computed; the registry was not touched.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A store read or write failed; the registry may hold part of the diff.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
