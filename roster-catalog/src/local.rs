//! Catalog source backed by a local checkout.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::entry::{join_path, DirectoryEntry, EntryKind, Lookup};
use crate::error::{io_err, CatalogError};

/// A node of a checkout on disk. `path` is relative to the checkout root.
///
/// Symlinks are reported as files and never followed.
#[derive(Debug, Clone)]
pub struct LocalEntry {
    checkout: Arc<Path>,
    name: String,
    kind: EntryKind,
    path: String,
}

impl LocalEntry {
    /// Open `path` inside `checkout` as a projects root.
    ///
    /// Returns [`CatalogError::RootNotFound`] unless it exists and is a directory.
    pub fn open(checkout: impl Into<PathBuf>, path: &str) -> Result<Self, CatalogError> {
        let checkout: Arc<Path> = Arc::from(checkout.into());
        let path = path.trim_matches('/');
        match stat(&checkout, path)? {
            Some(EntryKind::Directory) => Ok(Self {
                name: file_name(path).to_string(),
                kind: EntryKind::Directory,
                path: path.to_string(),
                checkout,
            }),
            _ => Err(CatalogError::RootNotFound {
                path: checkout.join(path).display().to_string(),
            }),
        }
    }

    fn child(&self, name: String, kind: EntryKind, path: String) -> Self {
        Self {
            checkout: Arc::clone(&self.checkout),
            name,
            kind,
            path,
        }
    }
}

impl DirectoryEntry for LocalEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn lookup(&self, path: &str) -> Result<Option<Lookup<Self>>, CatalogError> {
        let path = path.trim_matches('/');
        match stat(&self.checkout, path)? {
            None => Ok(None),
            Some(EntryKind::File) => Ok(Some(Lookup::Entry(self.child(
                file_name(path).to_string(),
                EntryKind::File,
                path.to_string(),
            )))),
            Some(EntryKind::Directory) => {
                let dir = self.checkout.join(path);
                let mut entries = Vec::new();
                for entry in fs::read_dir(&dir).map_err(|e| io_err(&dir, e))? {
                    let entry = entry.map_err(|e| io_err(&dir, e))?;
                    let file_type = entry.file_type().map_err(|e| io_err(entry.path(), e))?;
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let kind = if file_type.is_dir() {
                        EntryKind::Directory
                    } else {
                        EntryKind::File
                    };
                    let child_path = join_path(path, &name);
                    entries.push(self.child(name, kind, child_path));
                }
                entries.sort_by(|a, b| a.name.cmp(&b.name));
                Ok(Some(Lookup::Listing(entries)))
            }
        }
    }
}

/// Kind of `checkout/path` without following symlinks, `None` if absent.
fn stat(checkout: &Path, path: &str) -> Result<Option<EntryKind>, CatalogError> {
    let full = checkout.join(path);
    match fs::symlink_metadata(&full) {
        Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
        Ok(_) => Ok(Some(EntryKind::File)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(full, err)),
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
