//! Catalog source backed by a GitHub repository.
//!
//! Two endpoints are used:
//! - `GET /repos/{owner}/{repo}/git/trees/{branch}:{path}` lists a directory
//!   in one response (the contents API caps listings at 1000 entries);
//! - `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}` looks up a
//!   single path (a file object, or an array for a directory).
//!
//! Status mapping: `404` → absent, `401`/`403` → [`CatalogError::Unauthorized`],
//! anything else → [`CatalogError::Unavailable`].

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::entry::{join_path, DirectoryEntry, EntryKind, Lookup};
use crate::error::CatalogError;
use crate::token::AccessToken;

const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

/// Where and how to reach the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubSettings {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub timeout: Duration,
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One object of a contents API response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentsItem {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ContentsResponse {
    Listing(Vec<ContentsItem>),
    Entry(ContentsItem),
}

/// One object of a non-recursive trees API response; `path` is the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeResponse {
    pub tree: Vec<TreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

fn contents_kind(kind: &str) -> EntryKind {
    if kind == "dir" {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

fn tree_kind(kind: &str) -> EntryKind {
    if kind == "tree" {
        EntryKind::Directory
    } else {
        EntryKind::File
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Authenticated HTTP client shared by every [`GithubEntry`] of one tree.
pub struct GithubClient {
    agent: ureq::Agent,
    settings: GithubSettings,
    token: AccessToken,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("settings", &self.settings)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    pub fn new(settings: GithubSettings, token: AccessToken) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(settings.timeout).build();
        Self {
            agent,
            settings,
            token,
        }
    }

    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.settings.api_url.trim_end_matches('/'),
            self.settings.owner,
            self.settings.repo,
            path.trim_matches('/'),
        )
    }

    pub fn tree_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/git/trees/{}:{}",
            self.settings.api_url.trim_end_matches('/'),
            self.settings.owner,
            self.settings.repo,
            self.settings.branch,
            path.trim_matches('/'),
        )
    }

    /// Contents API lookup, `None` on 404.
    pub fn get_contents(&self, path: &str) -> Result<Option<ContentsResponse>, CatalogError> {
        let request = self
            .request(&self.contents_url(path))
            .query("ref", &self.settings.branch);
        self.fetch(request, path)
    }

    /// Trees API directory listing, `None` on 404.
    pub fn get_tree(&self, path: &str) -> Result<Option<TreeResponse>, CatalogError> {
        let request = self.request(&self.tree_url(path));
        let tree: Option<TreeResponse> = self.fetch(request, path)?;
        match tree {
            Some(tree) if tree.truncated => Err(CatalogError::Truncated {
                path: path.to_string(),
            }),
            other => Ok(other),
        }
    }

    /// Resolve the projects root, failing if it is absent.
    pub fn root(self: &Arc<Self>, path: &str) -> Result<GithubEntry, CatalogError> {
        let path = path.trim_matches('/');
        let listing = self
            .get_tree(path)?
            .ok_or_else(|| CatalogError::RootNotFound {
                path: path.to_string(),
            })?;
        Ok(GithubEntry {
            client: Arc::clone(self),
            name: path.rsplit('/').next().unwrap_or(path).to_string(),
            path: path.to_string(),
            kind: EntryKind::Directory,
            listing: Some(listing.tree),
        })
    }

    fn request(&self, url: &str) -> ureq::Request {
        self.agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.token.secret()))
            .set("Accept", ACCEPT)
            .set("User-Agent", USER_AGENT)
    }

    fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: ureq::Request,
        path: &str,
    ) -> Result<Option<T>, CatalogError> {
        tracing::debug!(path, url = request.url(), "fetching catalog path");
        match request.call() {
            Ok(response) => response
                .into_json::<T>()
                .map(Some)
                .map_err(|source| CatalogError::Decode {
                    path: path.to_string(),
                    source,
                }),
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(ureq::Error::Status(status @ (401 | 403), _)) => Err(CatalogError::Unauthorized {
                status,
                path: path.to_string(),
            }),
            Err(ureq::Error::Status(status, _)) => Err(CatalogError::Unavailable {
                path: path.to_string(),
                reason: format!("HTTP {status}"),
            }),
            Err(ureq::Error::Transport(transport)) => Err(CatalogError::Unavailable {
                path: path.to_string(),
                reason: transport.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// A node of the repository tree, fetched lazily through a shared client.
#[derive(Debug, Clone)]
pub struct GithubEntry {
    client: Arc<GithubClient>,
    name: String,
    path: String,
    kind: EntryKind,
    /// Directory listing already fetched when this entry was resolved.
    listing: Option<Vec<TreeItem>>,
}

impl GithubEntry {
    fn from_contents(client: &Arc<GithubClient>, item: ContentsItem) -> Self {
        Self {
            client: Arc::clone(client),
            kind: contents_kind(&item.kind),
            name: item.name,
            path: item.path,
            listing: None,
        }
    }

    fn child_from_tree(&self, item: TreeItem) -> Self {
        Self {
            client: Arc::clone(&self.client),
            kind: tree_kind(&item.kind),
            path: join_path(&self.path, &item.path),
            name: item.path,
            listing: None,
        }
    }
}

impl DirectoryEntry for GithubEntry {
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
        let client = &self.client;
        Ok(client.get_contents(path)?.map(|response| match response {
            ContentsResponse::Entry(item) => Lookup::Entry(GithubEntry::from_contents(client, item)),
            ContentsResponse::Listing(items) => Lookup::Listing(
                items
                    .into_iter()
                    .map(|item| GithubEntry::from_contents(client, item))
                    .collect(),
            ),
        }))
    }

    fn children(&self) -> Result<Vec<Self>, CatalogError> {
        if self.kind != EntryKind::Directory {
            return Ok(Vec::new());
        }
        let items = match &self.listing {
            Some(items) => items.clone(),
            None => match self.client.get_tree(&self.path)? {
                Some(tree) => tree.tree,
                None => return Ok(Vec::new()),
            },
        };
        Ok(items.into_iter().map(|item| self.child_from_tree(item)).collect())
    }
}
