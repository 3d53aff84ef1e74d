//! Project discovery tests over in-memory trees and local checkouts.
//!
//! Each `#[case]` builds its own tree; no state is shared.

use std::collections::BTreeSet;
use std::fs;

use roster_catalog::{
    discover_projects, CatalogError, DirectoryEntry, EnvTokenProvider, LocalEntry, TokenError,
    TokenProvider, TreeEntry,
};
use roster_core::ProjectName;
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn names(list: &[&str]) -> BTreeSet<ProjectName> {
    list.iter().copied().map(ProjectName::from).collect()
}

fn projects_root(children: Vec<TreeEntry>) -> TreeEntry {
    TreeEntry::dir("oss-fuzz", "projects", children)
}

fn valid(name: &str) -> TreeEntry {
    TreeEntry::project("projects", name)
}

/// Directory without a Dockerfile.
fn bare_dir(name: &str) -> TreeEntry {
    TreeEntry::dir(name, format!("projects/{name}"), vec![])
}

/// Directory with a Dockerfile, under an arbitrary name.
fn dir_with_marker(name: &str) -> TreeEntry {
    TreeEntry::dir(
        name,
        format!("projects/{name}"),
        vec![TreeEntry::file("Dockerfile", format!("projects/{name}/Dockerfile"))],
    )
}

fn file(name: &str) -> TreeEntry {
    TreeEntry::file(name, format!("projects/{name}"))
}

// ---------------------------------------------------------------------------
// 1. Scenarios
// ---------------------------------------------------------------------------

#[test]
fn all_valid_projects_are_found() {
    let root = projects_root(vec![valid("test0"), valid("test1")]);
    assert_eq!(discover_projects(&root).unwrap(), names(&["test0", "test1"]));
}

#[rstest]
#[case::missing_dockerfile(bare_dir("test1"))]
#[case::invalid_name(dir_with_marker("test1@"))]
#[case::not_a_directory(file("test1"))]
#[case::name_with_space(dir_with_marker("test 1"))]
#[case::name_with_dot(dir_with_marker("test.1"))]
#[case::dockerfile_is_a_directory(TreeEntry::dir(
    "test1",
    "projects/test1",
    vec![TreeEntry::dir("Dockerfile", "projects/test1/Dockerfile", vec![])],
))]
#[case::wrongly_cased_marker(TreeEntry::dir(
    "test1",
    "projects/test1",
    vec![TreeEntry::file("dockerfile", "projects/test1/dockerfile")],
))]
fn invalid_sibling_is_excluded(#[case] invalid: TreeEntry) {
    let root = projects_root(vec![valid("test0"), invalid]);
    assert_eq!(discover_projects(&root).unwrap(), names(&["test0"]));
}

// ---------------------------------------------------------------------------
// 2. Properties
// ---------------------------------------------------------------------------

#[test]
fn sibling_order_does_not_matter() {
    let children = vec![
        valid("curl"),
        bare_dir("empty"),
        valid("zlib"),
        file("README.md"),
        dir_with_marker("bad@name"),
        valid("libpng"),
    ];
    let forward = discover_projects(&projects_root(children.clone())).unwrap();
    let mut reversed_children = children;
    reversed_children.reverse();
    let reversed = discover_projects(&projects_root(reversed_children)).unwrap();

    assert_eq!(forward, reversed);
    assert_eq!(forward, names(&["curl", "libpng", "zlib"]));
}

#[test]
fn exclusion_is_decided_per_entry() {
    // Every invalid kind at once must not disturb the valid ones.
    let root = projects_root(vec![
        bare_dir("nodocker"),
        dir_with_marker("bad@"),
        file("plainfile"),
        valid("a"),
        valid("b"),
    ]);
    assert_eq!(discover_projects(&root).unwrap(), names(&["a", "b"]));

    let only_invalid = projects_root(vec![bare_dir("nodocker"), file("plainfile")]);
    assert!(discover_projects(&only_invalid).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// 3. Local checkout
// ---------------------------------------------------------------------------

fn checkout_with(layout: &[(&str, Option<&str>)]) -> TempDir {
    let checkout = TempDir::new().expect("tempdir");
    for (path, contents) in layout {
        let full = checkout.path().join(path);
        match contents {
            Some(body) => {
                fs::create_dir_all(full.parent().expect("parent")).unwrap();
                fs::write(&full, body).unwrap();
            }
            None => fs::create_dir_all(&full).unwrap(),
        }
    }
    checkout
}

#[test]
fn local_checkout_discovery_matches_rules() {
    let checkout = checkout_with(&[
        ("projects/curl/Dockerfile", Some("FROM base-builder\n")),
        ("projects/zlib/Dockerfile", Some("FROM base-builder\n")),
        ("projects/nodocker/build.sh", Some("#!/bin/bash\n")),
        ("projects/bad@name/Dockerfile", Some("FROM base-builder\n")),
        ("projects/README.md", Some("# projects\n")),
        ("projects/marker-dir/Dockerfile", None),
    ]);

    let root = LocalEntry::open(checkout.path(), "projects").expect("open root");
    assert_eq!(root.path(), "projects");
    assert_eq!(discover_projects(&root).unwrap(), names(&["curl", "zlib"]));
}

#[test]
fn local_missing_root_is_fatal() {
    let checkout = checkout_with(&[("infra/README.md", Some("x"))]);
    let err = LocalEntry::open(checkout.path(), "projects").unwrap_err();
    assert!(matches!(err, CatalogError::RootNotFound { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 4. Credentials
// ---------------------------------------------------------------------------

#[test]
fn token_without_credentials_is_an_auth_error() {
    let provider = EnvTokenProvider::new("ROSTER_DISCOVER_TESTS_UNSET_TOKEN");
    let err = provider.token().unwrap_err();
    assert!(matches!(err, TokenError::Missing { .. }), "got: {err}");

    let catalog_err = CatalogError::from(err);
    assert!(catalog_err.to_string().starts_with("authentication failed"));
}
