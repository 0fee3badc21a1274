//! In-memory policy store for unit and integration tests.

use crate::store::{KeyPath, PolicyStore, StoreError, Value};
use std::collections::BTreeMap;

/// Map-backed store. Beyond the `PolicyStore` surface it exposes read
/// accessors so tests can assert on the exact state left behind.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    keys: BTreeMap<String, BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value for inspection. Test-only convenience — the lockdown
    /// flow itself never reads the store.
    pub fn value(&self, path: &KeyPath, name: &str) -> Option<&Value> {
        self.keys.get(path.as_str()).and_then(|k| k.get(name))
    }

    /// All key paths currently present.
    pub fn paths(&self) -> Vec<&str> {
        self.keys.keys().map(|k| k.as_str()).collect()
    }

    /// Number of named values under a path (0 if the path is absent).
    pub fn value_count(&self, path: &KeyPath) -> usize {
        self.keys.get(path.as_str()).map_or(0, |k| k.len())
    }
}

impl PolicyStore for MemoryStore {
    fn set_value(&mut self, path: &KeyPath, name: &str, value: Value) -> Result<(), StoreError> {
        self.keys
            .entry(path.as_str().to_string())
            .or_default()
            .insert(name.to_string(), value);
        Ok(())
    }

    fn remove_value(&mut self, path: &KeyPath, name: &str) {
        if let Some(key) = self.keys.get_mut(path.as_str()) {
            key.remove(name);
        }
    }
}
