pub mod logger;
pub mod reader;
pub mod types;

pub use logger::AuditLogger;
pub use reader::AuditReader;
pub use types::*;

use crate::store::{KeyPath, PolicyStore, StoreError, Value};
use chrono::Utc;

/// Store decorator that journals every mutation it forwards.
///
/// Journal failures are warnings, never aborts — losing an audit line must
/// not leave a lockdown half-applied.
pub struct AuditedStore<'a> {
    inner: &'a mut dyn PolicyStore,
    logger: &'a mut AuditLogger,
    session_id: String,
    scenario: String,
}

impl<'a> AuditedStore<'a> {
    pub fn new(
        inner: &'a mut dyn PolicyStore,
        logger: &'a mut AuditLogger,
        session_id: impl Into<String>,
        scenario: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            logger,
            session_id: session_id.into(),
            scenario: scenario.into(),
        }
    }

    fn journal(&mut self, op: StoreOp, path: &KeyPath, name: &str, value: Option<Value>) {
        let entry = JournalEntry {
            timestamp: Utc::now(),
            session_id: self.session_id.clone(),
            scenario: self.scenario.clone(),
            op,
            path: path.as_str().to_string(),
            name: name.to_string(),
            value,
        };
        if let Err(e) = self.logger.log(&entry) {
            tracing::warn!("could not journal {} of '{}': {}", op, name, e);
        }
    }
}

impl PolicyStore for AuditedStore<'_> {
    fn set_value(&mut self, path: &KeyPath, name: &str, value: Value) -> Result<(), StoreError> {
        self.inner.set_value(path, name, value.clone())?;
        self.journal(StoreOp::Set, path, name, Some(value));
        Ok(())
    }

    fn remove_value(&mut self, path: &KeyPath, name: &str) {
        self.inner.remove_value(path, name);
        self.journal(StoreOp::Remove, path, name, None);
    }
}
