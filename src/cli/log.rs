//! `usblock log` — browse the applied-write journal.
//!
//! Shows what a lockdown run actually wrote: every set and remove, in
//! order, for the most recent session or a named one.

use crate::audit::AuditReader;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn run_log(session_id: Option<&str>, limit: Option<usize>) -> Result<()> {
    let reader = AuditReader::new().context("Failed to initialize journal reader")?;

    let entries = match session_id {
        Some(sid) => reader
            .read_session(sid)
            .with_context(|| format!("Failed to read session: {}", sid))?,
        None => reader.read_latest_session()?,
    };

    if entries.is_empty() {
        println!();
        println!("  {} No journal entries found.", "ℹ".blue());
        println!("  Apply a configuration first: {}", "usblock".dimmed());
        println!();
        return Ok(());
    }

    println!();
    println!(
        "  Session: {} | Scenario: {}",
        entries[0].session_id.cyan(),
        entries[0].scenario.bold()
    );
    println!();

    // A limit keeps the tail — the most recent writes are the interesting ones
    let shown = limit.unwrap_or(entries.len()).min(entries.len());
    let skipped = entries.len() - shown;
    if skipped > 0 {
        println!("  {}", format!("… {} earlier entries", skipped).dimmed());
    }
    for entry in &entries[skipped..] {
        println!("  {}", AuditReader::format_entry(entry));
    }
    println!();

    Ok(())
}

pub fn run_log_list() -> Result<()> {
    let reader = AuditReader::new()?;
    let sessions = reader.list_sessions()?;

    if sessions.is_empty() {
        println!();
        println!("  {} No sessions found.", "ℹ".blue());
        println!();
        return Ok(());
    }

    println!();
    println!("  Recorded sessions:");
    println!();
    for session in &sessions {
        println!("  • {}", session);
    }
    println!();
    println!("  View a session: {}", "usblock log --session <id>".dimmed());
    println!();

    Ok(())
}
