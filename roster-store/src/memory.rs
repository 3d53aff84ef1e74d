//! In-memory registry store.

use std::collections::{BTreeMap, BTreeSet};

use roster_core::{Project, ProjectName};

use crate::{RegistryStore, StoreError};

/// A [`RegistryStore`] held entirely in memory.
///
/// Counts record-level creations and deletions so callers can check that a
/// pass touched only the names it had to.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<ProjectName, Project>,
    created: usize,
    deleted: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing records, without counting them as creations.
    pub fn with_names<I, N>(names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<ProjectName>,
    {
        let records = names
            .into_iter()
            .map(|n| {
                let name = n.into();
                (name.clone(), Project::new(name))
            })
            .collect();
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn get(&self, name: &ProjectName) -> Option<&Project> {
        self.records.get(name)
    }

    /// Records created since construction.
    pub fn created(&self) -> usize {
        self.created
    }

    /// Records deleted since construction.
    pub fn deleted(&self) -> usize {
        self.deleted
    }
}

impl RegistryStore for MemoryStore {
    fn current_names(&self) -> Result<BTreeSet<ProjectName>, StoreError> {
        Ok(self.records.keys().cloned().collect())
    }

    fn upsert_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError> {
        for name in names {
            if !self.records.contains_key(name) {
                self.records.insert(name.clone(), Project::new(name.clone()));
                self.created += 1;
            }
        }
        Ok(())
    }

    fn delete_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError> {
        for name in names {
            if self.records.remove(name).is_some() {
                self.deleted += 1;
            }
        }
        Ok(())
    }
}
