//! Types for the applied-write journal.
//!
//! Every store mutation a scenario performs gets one entry. The journal is
//! the answer to "what did the last lockdown actually write?" — without it
//! the only record is the policy store itself.

use crate::store::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which store operation was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreOp {
    Set,
    Remove,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::Set => write!(f, "set"),
            StoreOp::Remove => write!(f, "remove"),
        }
    }
}

/// A single journal entry — one store mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// When the write happened
    pub timestamp: DateTime<Utc>,

    /// Run identifier (UUID, generated at process entry)
    pub session_id: String,

    /// Which scenario was being applied (e.g. "hid-only")
    pub scenario: String,

    /// set or remove
    pub op: StoreOp,

    /// Key path the mutation targeted
    pub path: String,

    /// Value name under the path
    pub name: String,

    /// The value written (absent for removals)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}
