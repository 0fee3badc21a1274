//! Policy store abstraction — hierarchical key paths holding typed named values.
//!
//! Every lockdown behavior in this tool reduces to a fixed table of
//! (path, name, value) writes against one store, so the writer layer stays
//! declarative and tests can simply inspect the store afterward.
//!
//! Backends: `MemoryStore` (tests), `FileStore` (JSON document, selected with
//! `--store`), and `RegistryStore` (HKLM, Windows only).

pub mod file;
pub mod memory;
#[cfg(windows)]
pub mod registry;

pub use file::FileStore;
pub use memory::MemoryStore;
#[cfg(windows)]
pub use registry::RegistryStore;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A node in the hierarchical store, e.g.
/// `SOFTWARE\Policies\Microsoft\Windows\RemovableStorageDevices`.
/// Paths are external, persistent OS state — this tool never creates or
/// destroys them beyond the create-if-absent done by `set_value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath(String);

impl KeyPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for KeyPath {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A typed value attached to a key path. The kind is always explicit —
/// no implicit default — so a flag can never be written with the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// Scalar integer (REG_DWORD in the registry backend).
    Integer(u32),
    /// Ordered list of strings (REG_MULTI_SZ in the registry backend).
    StringList(Vec<String>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::StringList(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Errors surfaced by `set_value` and store construction.
/// A failed write aborts the rest of the scenario sequence — there is no
/// retry and no rollback; re-running the scenario is the recovery path,
/// since every write is independently idempotent.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open or create key path '{path}'")]
    OpenPath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write value '{name}' under '{path}'")]
    WriteValue {
        path: String,
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to persist store document '{path}'")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("store document '{path}' is not valid JSON")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("store document '{path}' could not be encoded")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The store seam every higher layer writes through.
///
/// This tool is a pure writer/deleter: nothing here reads current state to
/// make decisions, and no locking is done against concurrent writers
/// (concurrent instances are assumed absent, not guarded against).
pub trait PolicyStore {
    /// Ensure `path` exists (idempotent create), then write `name = value`,
    /// overwriting any existing value unconditionally.
    fn set_value(&mut self, path: &KeyPath, name: &str, value: Value) -> Result<(), StoreError>;

    /// Best-effort delete of `name` under `path`. A missing path or value is
    /// a no-op, and I/O failures are swallowed (logged at debug level) —
    /// removal never fails the run.
    fn remove_value(&mut self, path: &KeyPath, name: &str);
}
