//! Directory-of-YAML registry store.
//!
//! # Storage layout
//!
//! ```text
//! <root>/                 (mode 0700, created on first write)
//!   <project>.yaml        (one record per project, mode 0600)
//! ```
//!
//! Writes go to a `.yaml.tmp` sibling, get `chmod 0600`, then `rename` over
//! the final path, so a reader never observes a half-written record. The
//! `.tmp` file is always in the same directory as the target (same
//! filesystem, no EXDEV).

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use roster_core::{Project, ProjectName};

use crate::error::{io_err, StoreError};
use crate::retry::RetryPolicy;
use crate::RegistryStore;

const RECORD_EXT: &str = "yaml";

/// Durable [`RegistryStore`] keeping one YAML file per project under `root`.
#[derive(Debug, Clone)]
pub struct YamlStore {
    root: PathBuf,
    retry: RetryPolicy,
}

impl YamlStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<name>.yaml`. Pure, no I/O.
    pub fn record_path(&self, name: &ProjectName) -> PathBuf {
        self.root.join(format!("{}.{RECORD_EXT}", name.0))
    }

    /// Load a single record, `None` if absent.
    pub fn load(&self, name: &ProjectName) -> Result<Option<Project>, StoreError> {
        let path = self.record_path(name);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(io_err(path, err)),
        };
        serde_yaml::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Parse { path, source: e })
    }

    /// Every record, sorted by name. Unlike [`RegistryStore::current_names`]
    /// this parses each file, so a corrupt record is an error.
    pub fn list(&self) -> Result<Vec<Project>, StoreError> {
        let mut projects = Vec::new();
        for name in self.current_names()? {
            if let Some(project) = self.load(&name)? {
                projects.push(project);
            }
        }
        Ok(projects)
    }

    fn upsert_one(&self, name: &ProjectName) -> Result<bool, StoreError> {
        let path = self.record_path(name);
        // Must agree with `current_names`, which only counts regular files.
        match std::fs::symlink_metadata(&path) {
            Ok(meta) if meta.is_file() => return Ok(false),
            Ok(_) => return Err(StoreError::NotARecord { path }),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(io_err(path, err)),
        }
        self.ensure_root()?;

        let yaml = serde_yaml::to_string(&Project::new(name.clone()))?;
        let tmp = path.with_file_name(format!("{}.{RECORD_EXT}.tmp", name.0));
        std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
        set_file_permissions(&tmp)?;
        if let Err(e) = std::fs::rename(&tmp, &path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(&path, e));
        }
        Ok(true)
    }

    fn delete_one(&self, name: &ProjectName) -> Result<bool, StoreError> {
        let path = self.record_path(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(io_err(path, err)),
        }
    }

    fn ensure_root(&self) -> Result<(), StoreError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| io_err(&self.root, e))?;
            set_dir_permissions(&self.root)?;
        }
        Ok(())
    }
}

impl RegistryStore for YamlStore {
    fn current_names(&self) -> Result<BTreeSet<ProjectName>, StoreError> {
        if !self.root.exists() {
            return Ok(BTreeSet::new());
        }
        // An unreadable entry fails the snapshot; skipping it would hide a
        // record from the diff.
        let mut names = BTreeSet::new();
        for entry in std::fs::read_dir(&self.root).map_err(|e| io_err(&self.root, e))? {
            let entry = entry.map_err(|e| io_err(&self.root, e))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            let file_type = entry.file_type().map_err(|e| io_err(&path, e))?;
            if !file_type.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                names.insert(ProjectName::from(stem.to_string_lossy().into_owned()));
            }
        }
        Ok(names)
    }

    fn upsert_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError> {
        for name in names {
            if !name.is_valid() {
                return Err(StoreError::InvalidName { name: name.0.clone() });
            }
            let created = self.retry.retry("upsert", || self.upsert_one(name))?;
            if created {
                tracing::info!(project = %name, "added project");
            } else {
                tracing::debug!(project = %name, "project already present");
            }
        }
        Ok(())
    }

    fn delete_many(&mut self, names: &BTreeSet<ProjectName>) -> Result<(), StoreError> {
        for name in names {
            let removed = self.retry.retry("delete", || self.delete_one(name))?;
            if removed {
                tracing::info!(project = %name, "removed project");
            } else {
                tracing::debug!(project = %name, "project already absent");
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
