//! # roster-store
//!
//! The persisted project registry.
//!
//! [`RegistryStore`] is the capability the reconciler consumes. [`YamlStore`]
//! is the durable implementation (one YAML record per project) and
//! [`MemoryStore`] the in-process one used for tests and dry runs.

use std::collections::BTreeSet;

use roster_core::ProjectName;

pub mod error;
pub mod memory;
pub mod retry;
pub mod yaml;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use retry::RetryPolicy;
pub use yaml::YamlStore;

/// A durable key-value collection of project records keyed by name.
///
/// Every operation is idempotent and safe to retry:
/// - `upsert_many` leaves already-present records untouched;
/// - `delete_many` ignores names that are already absent.
pub trait RegistryStore {
    /// Every project name currently persisted.
    fn current_names(&self) -> Result<BTreeSet<ProjectName>, StoreError>;

    /// Ensure each name exists as a record.
    fn upsert_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError>;

    /// Ensure each name is absent.
    fn delete_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError>;
}

impl<S: RegistryStore + ?Sized> RegistryStore for &mut S {
    fn current_names(&self) -> Result<BTreeSet<ProjectName>, StoreError> {
        (**self).current_names()
    }

    fn upsert_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError> {
        (**self).upsert_many(names)
    }

    fn delete_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError> {
        (**self).delete_many(names)
    }
}
