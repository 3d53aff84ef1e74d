//! In-memory directory tree.
//!
//! Stands in for a catalog source wherever a real one is not wanted: unit and
//! integration tests across the workspace build their trees with it.

use roster_core::MARKER_FILE;

use crate::entry::{join_path, DirectoryEntry, EntryKind, Lookup};
use crate::error::CatalogError;

/// An owned snapshot of a directory tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    name: String,
    kind: EntryKind,
    path: String,
    children: Vec<TreeEntry>,
}

impl TreeEntry {
    pub fn dir(name: impl Into<String>, path: impl Into<String>, children: Vec<TreeEntry>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
            path: path.into(),
            children,
        }
    }

    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
            path: path.into(),
            children: Vec::new(),
        }
    }

    /// `<parent>/<name>/` holding a `Dockerfile`.
    pub fn project(parent: &str, name: &str) -> Self {
        let path = join_path(parent, name);
        let marker = TreeEntry::file(MARKER_FILE, join_path(&path, MARKER_FILE));
        TreeEntry::dir(name, path, vec![marker])
    }

    /// Depth-first search of this subtree for an exact path.
    fn find(&self, path: &str) -> Option<&TreeEntry> {
        if self.path == path {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(path))
    }
}

impl DirectoryEntry for TreeEntry {
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
        Ok(self.find(path).map(|entry| match entry.kind {
            EntryKind::Directory => Lookup::Listing(entry.children.clone()),
            EntryKind::File => Lookup::Entry(entry.clone()),
        }))
    }
}
