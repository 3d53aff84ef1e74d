//! Domain types for the roster registry.
//!
//! Name sets are always `BTreeSet<ProjectName>` so that reports and log lines
//! come out in a stable order regardless of upstream listing order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the file whose presence qualifies a directory as a project.
pub const MARKER_FILE: &str = "Dockerfile";

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed project name. Primary key of the registry.
///
/// Construction does not validate; call [`ProjectName::is_valid`] where the
/// name comes from an untrusted listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl ProjectName {
    /// `true` when the name is non-empty and made only of ASCII alphanumerics,
    /// `-` and `_`.
    pub fn is_valid(&self) -> bool {
        is_valid_project_name(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Project-name rule shared by the catalog reader and the stores.
pub fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A persisted registry record.
///
/// `created_at` is stamped once when the record is first written; upserting an
/// existing name never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: ProjectName,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: ProjectName) -> Self {
        Self {
            name,
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
