//! Journal reader — list sessions and pretty-print entries for `usblock log`.

use crate::audit::types::{JournalEntry, StoreOp};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct AuditReader {
    log_dir: PathBuf,
}

impl AuditReader {
    /// Reader over the default journal directory.
    pub fn new() -> Result<Self> {
        let log_dir = crate::audit::logger::AuditLogger::log_directory()?;
        Ok(Self { log_dir })
    }

    /// Reader over a specific directory (for testing).
    pub fn with_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            log_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Read all entries for a session.
    pub fn read_session(&self, session_id: &str) -> Result<Vec<JournalEntry>> {
        let path = self.log_dir.join(format!("{}.jsonl", session_id));
        self.read_file(&path)
    }

    fn read_file(&self, path: &Path) -> Result<Vec<JournalEntry>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read journal: {}", path.display()))?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse journal entry at line {}", i + 1))
            })
            .collect()
    }

    /// Entries from the most recent session, empty if none exist.
    pub fn read_latest_session(&self) -> Result<Vec<JournalEntry>> {
        match self.find_latest_session()? {
            Some(path) => self.read_file(&path),
            None => Ok(Vec::new()),
        }
    }

    fn find_latest_session(&self) -> Result<Option<PathBuf>> {
        if !self.log_dir.exists() {
            return Ok(None);
        }

        let mut files: Vec<PathBuf> = fs::read_dir(&self.log_dir)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|e| e == "jsonl"))
            .collect();

        // Most recently modified first
        files.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        Ok(files.into_iter().next())
    }

    /// All recorded session ids, sorted.
    pub fn list_sessions(&self) -> Result<Vec<String>> {
        if !self.log_dir.exists() {
            return Ok(Vec::new());
        }

        let mut sessions: Vec<String> = fs::read_dir(&self.log_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "jsonl"))
            .filter_map(|e| {
                e.path()
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
            })
            .collect();

        sessions.sort();
        Ok(sessions)
    }

    /// One-line rendering of an entry for terminal output.
    pub fn format_entry(entry: &JournalEntry) -> String {
        let op = match entry.op {
            StoreOp::Set => "set".green(),
            StoreOp::Remove => "remove".yellow(),
        };
        let value = entry
            .value
            .as_ref()
            .map(|v| format!(" = {}", v))
            .unwrap_or_default();

        format!(
            "{} {:<6} {}\\{}{}",
            entry.timestamp.format("%H:%M:%S").to_string().dimmed(),
            op,
            entry.path.dimmed(),
            entry.name.bold(),
            value,
        )
    }
}
