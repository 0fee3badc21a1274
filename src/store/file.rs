//! JSON-document policy store.
//!
//! Backs the hidden `--store <path>` flag: the full lockdown flow can be
//! exercised (and end-to-end tested) on hosts without a system policy store.
//! The document is a two-level map, path → name → value, persisted with a
//! read-modify-write per mutation — this is a low-frequency config tool,
//! not a database.

use crate::store::{KeyPath, PolicyStore, StoreError, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

type Document = BTreeMap<String, BTreeMap<String, Value>>;

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    doc: Document,
}

impl FileStore {
    /// Open a store at `path`. A missing file is an empty store; the file is
    /// only created once the first value is written.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let doc = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StoreError::OpenPath {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.display().to_string(),
                source,
            })?
        } else {
            Document::new()
        };

        Ok(Self { path, doc })
    }

    fn persist(&self) -> Result<(), StoreError> {
        let to_err = |source| StoreError::Persist {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(to_err)?;
            }
        }
        let content =
            serde_json::to_string_pretty(&self.doc).map_err(|source| StoreError::Encode {
                path: self.path.display().to_string(),
                source,
            })?;
        fs::write(&self.path, content).map_err(to_err)
    }
}

impl PolicyStore for FileStore {
    fn set_value(&mut self, path: &KeyPath, name: &str, value: Value) -> Result<(), StoreError> {
        self.doc
            .entry(path.as_str().to_string())
            .or_default()
            .insert(name.to_string(), value);
        self.persist()
    }

    fn remove_value(&mut self, path: &KeyPath, name: &str) {
        let removed = self
            .doc
            .get_mut(path.as_str())
            .and_then(|key| key.remove(name));

        if removed.is_none() {
            return; // nothing to delete, nothing to persist
        }

        if let Err(e) = self.persist() {
            tracing::debug!("suppressed error persisting removal of '{}': {}", name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn path() -> KeyPath {
        KeyPath::from(r"SYSTEM\CurrentControlSet\Services\USBSTOR")
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("store.json");
        let mut store = FileStore::open(&file).unwrap();

        // Removal against the empty store must not create the file
        store.remove_value(&path(), "Start");
        assert!(!file.exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("store.json");

        let mut store = FileStore::open(&file).unwrap();
        store.set_value(&path(), "Start", Value::Integer(4)).unwrap();
        store
            .set_value(
                &path(),
                "Ids",
                Value::StringList(vec!["KBD1".into(), "MOU1".into()]),
            )
            .unwrap();
        drop(store);

        let reopened = FileStore::open(&file).unwrap();
        assert_eq!(reopened.doc[path().as_str()]["Start"], Value::Integer(4));
        assert_eq!(
            reopened.doc[path().as_str()]["Ids"],
            Value::StringList(vec!["KBD1".into(), "MOU1".into()])
        );
    }

    #[test]
    fn test_remove_persists() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("store.json");

        let mut store = FileStore::open(&file).unwrap();
        store.set_value(&path(), "Start", Value::Integer(4)).unwrap();
        store.remove_value(&path(), "Start");
        drop(store);

        let reopened = FileStore::open(&file).unwrap();
        assert!(reopened.doc[path().as_str()].get("Start").is_none());
    }

    #[test]
    fn test_unwritable_document_is_surfaced() {
        let tmp = TempDir::new().unwrap();
        // Parent "directory" is a regular file, so persisting must fail —
        // surfaced as a StoreError, never a panic
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::open(blocker.join("store.json")).unwrap();
        let err = store
            .set_value(&path(), "Start", Value::Integer(4))
            .unwrap_err();
        assert!(matches!(err, StoreError::Persist { .. }));
    }

    #[test]
    fn test_corrupt_document_is_surfaced() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("store.json");
        fs::write(&file, "not json").unwrap();

        let err = FileStore::open(&file).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
