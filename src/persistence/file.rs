//! JSON file store for native runs
//!
//! The whole store is one JSON object of string values, rewritten on every set.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::{KeyValueStore, StorageError};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self, key: &str) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    detail: e.to_string(),
                });
            }
        };
        serde_json::from_str(&text).map_err(|e| StorageError::Read {
            key: key.to_string(),
            detail: format!("{}: {}", self.path.display(), e),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load(key)?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = match self.load(key) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!(
                    "Replacing unreadable store {}, previous keys are lost: {}",
                    self.path.display(),
                    e
                );
                BTreeMap::new()
            }
        };
        entries.insert(key.to_string(), value.to_string());
        let write_err = |detail: String| StorageError::Write {
            key: key.to_string(),
            detail,
        };
        let json = serde_json::to_string_pretty(&entries).map_err(|e| write_err(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| write_err(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "smart_teammates_{}_{}.json",
            name,
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let store = FileStore::new(temp_path("missing"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let path = temp_path("roundtrip");
        let mut store = FileStore::new(&path);
        store.set("a", "1.5").unwrap();
        store.set("b", "\"fast\"").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1.5"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("\"fast\""));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_corrupt_file_is_read_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get("a"), Err(StorageError::Read { .. })));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_write_replaces_corrupt_file() {
        let path = temp_path("replace");
        fs::write(&path, "not json").unwrap();
        let mut store = FileStore::new(&path);
        store.set("a", "2.5").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2.5"));
        let _ = fs::remove_file(path);
    }
}
