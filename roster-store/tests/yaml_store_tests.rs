//! YamlStore idempotency, listing, and parse-error integration tests.

use std::collections::BTreeSet;
use std::fs;

use assert_fs::prelude::*;
use predicates::prelude::predicate;
use roster_core::ProjectName;
use roster_store::{RegistryStore, StoreError, YamlStore};

fn set(names: &[&str]) -> BTreeSet<ProjectName> {
    names.iter().copied().map(ProjectName::from).collect()
}

// ---------------------------------------------------------------------------
// 1. Idempotency
// ---------------------------------------------------------------------------

#[test]
fn upsert_twice_leaves_record_untouched() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let mut store = YamlStore::new(dir.path());

    store.upsert_many(&set(&["curl"])).expect("first upsert");
    let path = store.record_path(&ProjectName::from("curl"));
    let first = fs::read_to_string(&path).expect("read");

    store.upsert_many(&set(&["curl"])).expect("second upsert");
    let second = fs::read_to_string(&path).expect("read");

    assert_eq!(first, second, "existing record must not be rewritten");
}

#[test]
fn delete_missing_names_succeeds() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let mut store = YamlStore::new(dir.path().join("registry"));

    store
        .delete_many(&set(&["ghost", "phantom"]))
        .expect("delete of absent names is a no-op");
    assert!(store.current_names().expect("names").is_empty());
}

#[test]
fn upsert_then_delete_round_trips_names() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let mut store = YamlStore::new(dir.path());

    store.upsert_many(&set(&["curl", "zlib", "libpng"])).expect("upsert");
    assert_eq!(store.current_names().unwrap(), set(&["curl", "libpng", "zlib"]));

    store.delete_many(&set(&["zlib"])).expect("delete");
    assert_eq!(store.current_names().unwrap(), set(&["curl", "libpng"]));
    dir.child("zlib.yaml").assert(predicate::path::missing());
}

// ---------------------------------------------------------------------------
// 2. Listing
// ---------------------------------------------------------------------------

#[test]
fn current_names_ignores_foreign_files() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("curl.yaml")
        .write_str("name: curl\ncreated_at: 2024-01-01T00:00:00Z\n")
        .unwrap();
    dir.child("zlib.yaml.tmp").write_str("partial").unwrap();
    dir.child("README.md").write_str("# notes").unwrap();
    dir.child("nested.yaml").create_dir_all().unwrap();

    let store = YamlStore::new(dir.path());
    assert_eq!(store.current_names().unwrap(), set(&["curl"]));
}

#[test]
fn list_returns_parsed_records_sorted() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let mut store = YamlStore::new(dir.path());
    store.upsert_many(&set(&["zlib", "curl"])).expect("upsert");

    let names: Vec<String> = store
        .list()
        .expect("list")
        .into_iter()
        .map(|p| p.name.0)
        .collect();
    assert_eq!(names, ["curl", "zlib"]);
}

#[test]
fn load_absent_record_is_none() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    let store = YamlStore::new(dir.path());
    assert!(store.load(&ProjectName::from("curl")).expect("load").is_none());
}

// ---------------------------------------------------------------------------
// 3. Errors
// ---------------------------------------------------------------------------

#[test]
fn corrupt_record_returns_parse_error_with_path() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("curl.yaml")
        .write_str(": : corrupt : yaml : !!!\n  - broken: [unclosed")
        .unwrap();

    let store = YamlStore::new(dir.path());
    // Names come from file stems, so a corrupt record still lists.
    assert_eq!(store.current_names().unwrap(), set(&["curl"]));

    let err = store.list().unwrap_err();
    assert!(matches!(err, StoreError::Parse { .. }), "got: {err}");
    assert!(err.to_string().contains("curl.yaml"), "got: {err}");
}

#[cfg(unix)]
#[test]
fn unwritable_root_fails_without_retrying_forever() {
    use std::os::unix::fs::PermissionsExt;

    let dir = assert_fs::TempDir::new().expect("tempdir");
    let root = dir.path().join("registry");
    fs::create_dir_all(&root).unwrap();
    fs::set_permissions(&root, fs::Permissions::from_mode(0o500)).unwrap();

    // Root bypasses permission bits; nothing to assert in that case.
    if fs::write(root.join("canary"), b"x").is_ok() {
        return;
    }

    let mut store = YamlStore::new(&root);
    let err = store.upsert_many(&set(&["curl"])).unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }), "got: {err}");
    assert!(!err.is_transient());

    fs::set_permissions(&root, fs::Permissions::from_mode(0o700)).unwrap();
}

#[cfg(unix)]
#[test]
fn unreadable_registry_fails_snapshot() {
    use std::os::unix::fs::PermissionsExt;

    let dir = assert_fs::TempDir::new().expect("tempdir");
    let mut store = YamlStore::new(dir.path().join("registry"));
    store.upsert_many(&set(&["curl"])).expect("seed");
    fs::set_permissions(store.root(), fs::Permissions::from_mode(0o300)).unwrap();

    // Root bypasses permission bits; nothing to assert in that case.
    if fs::read_dir(store.root()).is_ok() {
        fs::set_permissions(store.root(), fs::Permissions::from_mode(0o700)).unwrap();
        return;
    }

    let err = store.current_names().unwrap_err();
    assert!(matches!(err, StoreError::Io { .. }), "got: {err}");

    fs::set_permissions(store.root(), fs::Permissions::from_mode(0o700)).unwrap();
}

#[test]
fn directory_squatting_a_record_path_blocks_upsert() {
    let dir = assert_fs::TempDir::new().expect("tempdir");
    dir.child("zlib.yaml").create_dir_all().unwrap();
    let mut store = YamlStore::new(dir.path());

    let err = store.upsert_many(&set(&["curl", "zlib"])).unwrap_err();
    assert!(matches!(err, StoreError::NotARecord { .. }), "got: {err}");
    // Names before the bad one were written; the bad one is never counted.
    assert_eq!(store.current_names().unwrap(), set(&["curl"]));
}
