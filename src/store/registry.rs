//! HKLM registry backend — the real system policy store.
//!
//! `Integer` maps to REG_DWORD, `StringList` to REG_MULTI_SZ.
//! `create_subkey` supplies the create-if-absent invariant for writes.

use crate::store::{KeyPath, PolicyStore, StoreError, Value};
use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_SET_VALUE};
use winreg::RegKey;

pub struct RegistryStore {
    root: RegKey,
}

impl RegistryStore {
    /// Store rooted at HKEY_LOCAL_MACHINE. Requires an elevated process for
    /// writes — callers run the privilege guard first.
    pub fn open_system() -> Self {
        Self {
            root: RegKey::predef(HKEY_LOCAL_MACHINE),
        }
    }
}

impl PolicyStore for RegistryStore {
    fn set_value(&mut self, path: &KeyPath, name: &str, value: Value) -> Result<(), StoreError> {
        let (key, _disposition) =
            self.root
                .create_subkey(path.as_str())
                .map_err(|source| StoreError::OpenPath {
                    path: path.as_str().to_string(),
                    source,
                })?;

        let write_err = |source| StoreError::WriteValue {
            path: path.as_str().to_string(),
            name: name.to_string(),
            source,
        };

        match value {
            Value::Integer(v) => key.set_value(name, &v).map_err(write_err),
            Value::StringList(items) => key.set_value(name, &items).map_err(write_err),
        }
    }

    fn remove_value(&mut self, path: &KeyPath, name: &str) {
        let key = match self.root.open_subkey_with_flags(path.as_str(), KEY_SET_VALUE) {
            Ok(key) => key,
            // Missing path is a no-op by contract
            Err(_) => return,
        };

        if let Err(e) = key.delete_value(name) {
            tracing::debug!("suppressed error deleting '{}' under '{}': {}", name, path, e);
        }
    }
}
