use crate::util;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use test_log::test;

/// In-memory view of a `.properties`-style key/value file.
///
/// The backing file is read once at construction; `set` and `remove` only
/// touch the in-memory map and are never written back to disk. A missing or
/// unreadable file yields an empty store rather than an error. Not safe for
/// concurrent mutation, wrap in a lock if shared across threads.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyStore {
    entries: HashMap<String, String>,
}

impl PropertyStore {
    /// Loads from the default location (`resources/global.properties` under
    /// the configured base directory).
    pub fn new() -> Self {
        Self::from_candidates(&[util::dirs::default_properties_path()])
    }

    /// Loads from `path`, falling back to the default location when `path`
    /// does not exist or cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::from_candidates(&[
            path.as_ref().to_path_buf(),
            util::dirs::default_properties_path(),
        ])
    }

    fn from_candidates(candidates: &[PathBuf]) -> Self {
        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match fs::read_to_string(candidate) {
                Ok(file) => {
                    debug!("loading properties: {}", candidate.display());
                    return Self {
                        entries: parse_properties(&file),
                    };
                }
                Err(err) => {
                    info!(
                        "could not load properties file {}: {err}",
                        candidate.display()
                    );
                }
            }
        }
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Inserts or overwrites a key in the in-memory map only.
    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Removes a key from the in-memory map only. No-op when absent.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Base-10 integer read. Absent keys and unparseable values both yield
    /// `None`; parse failures are logged with the offending value.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        let value = self.get(key)?;
        match value.parse::<i64>() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                info!("value of key {key} is {value}, can't parse it to int: {err}");
                None
            }
        }
    }

    /// Floating-point read with the same contract as [`Self::get_int`].
    pub fn get_double(&self, key: &str) -> Option<f64> {
        let value = self.get(key)?;
        match value.parse::<f64>() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                info!("value of key {key} is {value}, can't parse it to double: {err}");
                None
            }
        }
    }

    /// True iff the stored value equals `true` case-insensitively. Absent
    /// keys and every other value yield false.
    pub fn get_boolean(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All keys currently in the store, no ordering guarantee.
    pub fn keys(&self) -> HashSet<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_properties(file: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    for line in file.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = split_pair(line) {
            entries.insert(key, value);
        }
    }
    entries
}

// Separator priority: first `=`, else first `:`, else a whitespace run with
// the remainder rejoined by single spaces. Lines without a key and a value
// are dropped.
fn split_pair(line: &str) -> Option<(String, String)> {
    let (key, value) = if let Some((key, value)) = line.split_once('=') {
        (key.trim().to_string(), value.trim().to_string())
    } else if let Some((key, value)) = line.split_once(':') {
        (key.trim().to_string(), value.trim().to_string())
    } else {
        let mut tokens = line.split_whitespace();
        let key = tokens.next()?.to_string();
        let rest = tokens.collect::<Vec<_>>();
        (key, rest.join(" "))
    };
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

#[test]
fn separators_and_trimming() {
    use pretty_assertions::assert_eq;

    let entries = parse_properties("eq = one\ncolon : two\nspaced   three  four\n");
    assert_eq!(entries.get("eq"), Some(&"one".to_string()));
    assert_eq!(entries.get("colon"), Some(&"two".to_string()));
    assert_eq!(entries.get("spaced"), Some(&"three four".to_string()));
    assert_eq!(entries.len(), 3);

    // first `=` wins over a later `:` and over whitespace
    let entries = parse_properties("url=localhost:8080\na b = c\n");
    assert_eq!(entries.get("url"), Some(&"localhost:8080".to_string()));
    assert_eq!(entries.get("a b"), Some(&"c".to_string()));
}

#[test]
fn comments_blanks_and_malformed_lines() {
    use pretty_assertions::assert_eq;

    let entries = parse_properties(
        "# a comment\n! another comment\n\n   \nbare_key\nempty=\nalso_empty :   \nok=fine\n",
    );
    assert_eq!(entries.get("ok"), Some(&"fine".to_string()));
    assert_eq!(entries.len(), 1);
}

#[test]
fn duplicate_keys_last_wins() {
    use pretty_assertions::assert_eq;

    let entries = parse_properties("key=first\nkey=second\nkey : third\n");
    assert_eq!(entries.get("key"), Some(&"third".to_string()));
    assert_eq!(entries.len(), 1);
}

#[test]
fn typed_accessors_from_file() {
    use pretty_assertions::assert_eq;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("test.properties");
    fs::write(&path, "answer=42\nflag=true\nratio=3.5\n")
        .expect("failed to write properties file");

    let store = PropertyStore::from_file(&path);
    assert_eq!(store.get("answer"), Some("42"));
    assert_eq!(store.get_int("answer"), Some(42));
    assert!(store.get_boolean("flag"));
    let ratio = store.get_double("ratio").expect("ratio should parse");
    assert!((ratio - 3.5).abs() < f64::EPSILON);
    assert_eq!(
        store.keys(),
        HashSet::from(["answer".to_string(), "flag".to_string(), "ratio".to_string()])
    );
}

#[test]
fn absent_and_malformed_values() {
    use pretty_assertions::assert_eq;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("test.properties");
    fs::write(&path, "value=not-a-number\n").expect("failed to write properties file");

    let store = PropertyStore::from_file(&path);
    assert_eq!(store.get("missing"), None);
    assert_eq!(store.get_int("missing"), None);
    assert_eq!(store.get_double("missing"), None);
    assert!(!store.get_boolean("missing"));
    assert_eq!(store.get_int("value"), None);
    assert_eq!(store.get_double("value"), None);
}

#[test]
fn boolean_literals() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("test.properties");
    fs::write(
        &path,
        "lower=true\nupper=TRUE\nmixed=True\noff=false\nnum=1\nword=yes\n",
    )
    .expect("failed to write properties file");

    let store = PropertyStore::from_file(&path);
    assert!(store.get_boolean("lower"));
    assert!(store.get_boolean("upper"));
    assert!(store.get_boolean("mixed"));
    assert!(!store.get_boolean("off"));
    assert!(!store.get_boolean("num"));
    assert!(!store.get_boolean("word"));
}

#[test]
fn set_and_remove() {
    use pretty_assertions::assert_eq;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let mut store = PropertyStore::from_candidates(&[dir.path().join("nope.properties")]);
    assert!(store.is_empty());

    store.set("k", "v");
    assert_eq!(store.get("k"), Some("v"));
    assert!(store.contains_key("k"));

    store.set("k", "v2");
    assert_eq!(store.get("k"), Some("v2"));
    assert_eq!(store.len(), 1);

    store.remove("k");
    assert_eq!(store.get("k"), None);
    store.remove("k"); // no-op when absent
    assert!(store.is_empty());
}

#[test]
fn unreadable_candidate_falls_through() {
    use pretty_assertions::assert_eq;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let broken = dir.path().join("broken.properties");
    let good = dir.path().join("good.properties");
    fs::write(&broken, [0xff_u8, 0xfe, 0xfd]).expect("failed to write broken file");
    fs::write(&good, "key=value\n").expect("failed to write good file");

    let store = PropertyStore::from_candidates(&[broken.clone(), good]);
    assert_eq!(store.get("key"), Some("value"));

    // every candidate unreadable degrades to an empty store
    let store = PropertyStore::from_candidates(&[broken]);
    assert!(store.is_empty());
}

#[test]
fn iteration_views() {
    use pretty_assertions::assert_eq;

    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("test.properties");
    fs::write(&path, "a=1\nb=2\n").expect("failed to write properties file");

    let store = PropertyStore::from_file(&path);
    let mut pairs = store
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect::<Vec<_>>();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string())
        ]
    );

    let mut values = store.values().collect::<Vec<_>>();
    values.sort_unstable();
    assert_eq!(values, vec!["1", "2"]);
}
