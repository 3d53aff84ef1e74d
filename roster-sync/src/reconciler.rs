//! Registry reconciliation.
//!
//! ## One pass
//!
//! 1. Snapshot `existing` from the store (read once).
//! 2. `to_add = target − existing`, `to_remove = existing − target`.
//! 3. Upsert `to_add`, then delete `to_remove`.
//!
//! Names in both sets are never sent to the store. Additions are applied
//! before removals: an interrupted pass leaves a superset of the target,
//! which the next pass re-diffs and completes.

use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;

use roster_core::ProjectName;
use roster_store::RegistryStore;

use crate::error::SyncError;

/// The diff between a target set and a registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SyncPlan {
    pub to_add: BTreeSet<ProjectName>,
    pub to_remove: BTreeSet<ProjectName>,
    pub unchanged: BTreeSet<ProjectName>,
}

impl SyncPlan {
    pub fn compute(target: &BTreeSet<ProjectName>, existing: &BTreeSet<ProjectName>) -> Self {
        Self {
            to_add: target.difference(existing).cloned().collect(),
            to_remove: existing.difference(target).cloned().collect(),
            unchanged: target.intersection(existing).cloned().collect(),
        }
    }

    /// `true` when the registry already matches the target.
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// Outcome of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    #[serde(flatten)]
    pub plan: SyncPlan,
    /// The plan was computed but not applied.
    pub dry_run: bool,
    pub duration_ms: u128,
}

/// Diffs target sets against an injected [`RegistryStore`] and applies them.
#[derive(Debug)]
pub struct Reconciler<S> {
    store: S,
}

impl<S: RegistryStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Snapshot the store and diff it against `target`. No mutation.
    pub fn plan(&self, target: &BTreeSet<ProjectName>) -> Result<SyncPlan, SyncError> {
        let existing = self.store.current_names()?;
        Ok(SyncPlan::compute(target, &existing))
    }

    /// Make the registry hold exactly `target`.
    pub fn sync(&mut self, target: &BTreeSet<ProjectName>) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        let plan = self.plan(target)?;

        if !plan.to_add.is_empty() {
            self.store.upsert_many(&plan.to_add)?;
        }
        if !plan.to_remove.is_empty() {
            self.store.delete_many(&plan.to_remove)?;
        }

        tracing::info!(
            added = plan.to_add.len(),
            removed = plan.to_remove.len(),
            unchanged = plan.unchanged.len(),
            "registry reconciled"
        );
        Ok(SyncReport {
            plan,
            dry_run: false,
            duration_ms: started.elapsed().as_millis(),
        })
    }

    /// Compute what [`Reconciler::sync`] would do, leaving the store alone.
    pub fn dry_run(&self, target: &BTreeSet<ProjectName>) -> Result<SyncReport, SyncError> {
        let started = Instant::now();
        let plan = self.plan(target)?;
        tracing::info!(
            would_add = plan.to_add.len(),
            would_remove = plan.to_remove.len(),
            unchanged = plan.unchanged.len(),
            "[dry-run] registry diff"
        );
        Ok(SyncReport {
            plan,
            dry_run: true,
            duration_ms: started.elapsed().as_millis(),
        })
    }
}
