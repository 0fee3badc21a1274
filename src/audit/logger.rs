//! Journal writer — append-only JSONL files.
//!
//! Writes to `~/.usblock/logs/{session_id}.jsonl`, one JSON object per line,
//! flushed after every write. `USBLOCK_LOG_DIR` overrides the directory
//! (used by the CLI tests to stay out of the real home).

use crate::audit::types::JournalEntry;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct AuditLogger {
    log_path: PathBuf,
    file: File,
    entry_count: usize,
}

impl AuditLogger {
    /// Create a logger for a session, creating the log directory as needed.
    pub fn new(session_id: &str) -> Result<Self> {
        let log_dir = Self::log_directory()?;
        fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        Self::with_path(log_dir.join(format!("{}.jsonl", session_id)))
    }

    /// Create a logger writing to a specific path (for testing).
    pub fn with_path(path: impl AsRef<Path>) -> Result<Self> {
        let log_path = path.as_ref().to_path_buf();
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            log_path,
            file,
            entry_count: 0,
        })
    }

    /// Append one entry, flushing immediately.
    pub fn log(&mut self, entry: &JournalEntry) -> Result<()> {
        let json = serde_json::to_string(entry).context("Failed to serialize journal entry")?;
        writeln!(self.file, "{}", json).context("Failed to write journal entry")?;
        self.file.flush().context("Failed to flush journal")?;
        self.entry_count += 1;
        Ok(())
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Journal directory: $USBLOCK_LOG_DIR, or ~/.usblock/logs/.
    pub fn log_directory() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("USBLOCK_LOG_DIR") {
            return Ok(PathBuf::from(dir));
        }
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".usblock").join("logs"))
    }
}
