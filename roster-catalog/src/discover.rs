//! Project discovery over a `projects/` root.
//!
//! A direct child of the root is a project when:
//! 1. it is a directory;
//! 2. its name passes [`ProjectName::is_valid`];
//! 3. `<root>/<name>/Dockerfile` exists and is a file.
//!
//! Each child is judged on its own. A child that fails a check is skipped and
//! logged, never reported as an error. Only failures to reach the tree abort.

use std::collections::BTreeSet;
use std::fmt;

use roster_core::{ProjectName, MARKER_FILE};

use crate::entry::{join_path, DirectoryEntry, EntryKind, Lookup};
use crate::error::CatalogError;

/// Why a child of the projects root was not counted as a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotADirectory,
    InvalidName,
    MissingMarker,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotADirectory => write!(f, "not a directory"),
            SkipReason::InvalidName => write!(f, "invalid project name"),
            SkipReason::MissingMarker => write!(f, "no {MARKER_FILE}"),
        }
    }
}

/// `<root>/<name>/Dockerfile`
pub fn marker_path(root_path: &str, name: &str) -> String {
    join_path(&join_path(root_path, name), MARKER_FILE)
}

/// Compute the set of valid project names under `root`.
///
/// The caller guarantees `root` is a directory. Sibling order and duplicate
/// entries upstream do not affect the result.
pub fn discover_projects<E: DirectoryEntry>(
    root: &E,
) -> Result<BTreeSet<ProjectName>, CatalogError> {
    let mut projects = BTreeSet::new();
    let mut skipped = 0usize;

    for child in root.children()? {
        match check_candidate(root, &child)? {
            None => {
                projects.insert(ProjectName::from(child.name()));
            }
            Some(reason) => {
                skipped += 1;
                tracing::debug!(entry = child.path(), %reason, "skipping entry");
            }
        }
    }

    tracing::info!(
        root = root.path(),
        projects = projects.len(),
        skipped,
        "discovered projects"
    );
    Ok(projects)
}

/// `Ok(None)` when `child` qualifies, otherwise the first failed check.
fn check_candidate<E: DirectoryEntry>(
    root: &E,
    child: &E,
) -> Result<Option<SkipReason>, CatalogError> {
    if child.kind() != EntryKind::Directory {
        return Ok(Some(SkipReason::NotADirectory));
    }
    if !ProjectName::from(child.name()).is_valid() {
        return Ok(Some(SkipReason::InvalidName));
    }

    let marker = marker_path(root.path(), child.name());
    let has_marker = root
        .lookup(&marker)?
        .map(Lookup::into_entries)
        .unwrap_or_default()
        .iter()
        .any(|e| {
            e.name() == MARKER_FILE && e.kind() == EntryKind::File && e.path() == marker
        });

    Ok((!has_marker).then_some(SkipReason::MissingMarker))
}
