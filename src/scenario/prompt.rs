//! Confirmation prompt — the gate between selecting a scenario and writing
//! anything.
//!
//! Confirmation is an exact, case-sensitive match on the single character
//! `Y`. Anything else — including lowercase `y` — cancels. That matching is
//! part of the documented cancellation contract and is covered by tests;
//! see DESIGN.md before "fixing" it.

use crate::scenario::Scenario;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Seam for the confirmation step. The terminal implementation reads stdin;
/// tests script the answer.
pub trait ConfirmPrompt {
    fn confirm(&mut self, scenario: Scenario) -> Result<bool>;
}

/// Interactive prompt: prints the scenario explanation, asks once, reads one
/// line.
pub struct TerminalPrompt;

impl TerminalPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&mut self, scenario: Scenario) -> Result<bool> {
        println!();
        println!("  {}", scenario.title().bold());
        for line in scenario.explanation().lines() {
            println!("  {}", line);
        }
        println!();
        print!(
            "  Apply this configuration? [{} = yes, anything else cancels] ",
            "Y".green().bold()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;

        Ok(is_affirmative(&input))
    }
}

/// Scripted prompt for tests — answers with a fixed input line.
pub struct ScriptedPrompt {
    answer: String,
}

impl ScriptedPrompt {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, _scenario: Scenario) -> Result<bool> {
        Ok(is_affirmative(&self.answer))
    }
}

/// Exact match on `Y` after stripping only the line terminator. No
/// trimming of other whitespace, no case folding.
fn is_affirmative(input: &str) -> bool {
    input.trim_end_matches(['\r', '\n']) == "Y"
}
