//! The directory-entry capability the catalog reader walks.

use crate::error::CatalogError;

/// Node type of an upstream entry. Anything that is not a directory
/// (regular file, symlink, submodule) is a `File`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    File,
}

/// Result of looking up a path: a single entry, or the listing of a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<E> {
    Entry(E),
    Listing(Vec<E>),
}

impl<E> Lookup<E> {
    pub fn into_entries(self) -> Vec<E> {
        match self {
            Lookup::Entry(entry) => vec![entry],
            Lookup::Listing(entries) => entries,
        }
    }
}

/// A read-only node of the source-of-truth tree.
///
/// Paths are `/`-separated and relative to the tree root.
pub trait DirectoryEntry: Sized {
    fn name(&self) -> &str;

    fn kind(&self) -> EntryKind;

    fn path(&self) -> &str;

    /// Look up `path` anywhere in the tree this entry belongs to.
    ///
    /// `Ok(None)` means nothing exists there; `Err` is reserved for failures
    /// to reach the tree at all.
    fn lookup(&self, path: &str) -> Result<Option<Lookup<Self>>, CatalogError>;

    /// Direct children of a directory; empty for files.
    fn children(&self) -> Result<Vec<Self>, CatalogError> {
        if self.kind() != EntryKind::Directory {
            return Ok(Vec::new());
        }
        match self.lookup(self.path())? {
            Some(Lookup::Listing(entries)) => Ok(entries),
            Some(Lookup::Entry(_)) | None => Ok(Vec::new()),
        }
    }
}

/// Join a tree path and a child name.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}
