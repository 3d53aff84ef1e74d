//! # roster-sync
//!
//! Reconciliation of the project registry against the upstream tree.
//!
//! [`Reconciler`] diffs a target name set against a [`RegistryStore`] and
//! applies the difference. [`pipeline::run`] is the entrypoint the CLI uses:
//! it acquires credentials, discovers the target set from the configured
//! catalog source, and reconciles the configured store.
//!
//! [`RegistryStore`]: roster_store::RegistryStore

pub mod error;
pub mod pipeline;
pub mod reconciler;

pub use error::SyncError;
pub use reconciler::{Reconciler, SyncPlan, SyncReport};
