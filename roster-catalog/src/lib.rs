//! # roster-catalog
//!
//! Reads the upstream `projects/` tree and decides which entries are projects.
//!
//! The tree is reached through the [`DirectoryEntry`] capability, implemented
//! for a GitHub repository ([`GithubEntry`]), a local checkout
//! ([`LocalEntry`]) and an in-memory tree ([`TreeEntry`]).
//! [`discover_projects`] turns a root entry into the target name set.

pub mod discover;
pub mod entry;
pub mod error;
pub mod fixture;
pub mod github;
pub mod local;
pub mod token;

pub use discover::{discover_projects, marker_path, SkipReason};
pub use entry::{DirectoryEntry, EntryKind, Lookup};
pub use error::{CatalogError, TokenError};
pub use fixture::TreeEntry;
pub use github::{GithubClient, GithubEntry, GithubSettings};
pub use local::LocalEntry;
pub use token::{
    AccessToken, EnvTokenProvider, FileTokenProvider, StaticTokenProvider, TokenProvider,
};
