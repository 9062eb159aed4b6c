pub mod store;
pub mod util;

pub use store::PropertyStore;

use std::path::Path;
use test_log::test;

/// Builds a fresh [`PropertyStore`], honoring `path` as the first candidate
/// when given. The backing file is re-read on every call; this is not a
/// cached singleton.
pub fn global_property_entity(path: Option<&Path>) -> PropertyStore {
    match path {
        Some(path) => PropertyStore::from_file(path),
        None => PropertyStore::new(),
    }
}

/// Looks up `key` in the default global properties file. Re-parses the file
/// on every call.
pub fn global_property(key: &str) -> Option<String> {
    PropertyStore::new().get(key).map(str::to_string)
}

#[test]
fn global_entity_reads_explicit_path() {
    use pretty_assertions::assert_eq;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("global.properties");
    std::fs::write(&path, "greeting=hello\n").expect("failed to write properties file");

    let store = global_property_entity(Some(&path));
    assert_eq!(store.get("greeting"), Some("hello"));

    // each call re-reads the file
    std::fs::write(&path, "greeting=goodbye\n").expect("failed to rewrite properties file");
    let store = global_property_entity(Some(&path));
    assert_eq!(store.get("greeting"), Some("goodbye"));
}

#[test]
fn global_property_absent_without_default_file() {
    use pretty_assertions::assert_eq;

    // the repository ships no resources/global.properties, so the default
    // candidate does not exist and lookups report absence
    assert_eq!(global_property("no_such_key"), None);
    let store = global_property_entity(None);
    assert!(store.is_empty());
}
