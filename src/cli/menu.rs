//! Interactive menu — the no-subcommand default.
//!
//! Prints the fixed scenario list, reads a single line, dispatches on an
//! exact match of "1", "2" or "3". Anything else prints one message and
//! returns cleanly (exit 0) — no re-prompt loop, matching the confirmation
//! gate's single-shot behavior.

use crate::cli::apply::execute_scenario;
use crate::devices::DeviceInventory;
use crate::scenario::Scenario;
use crate::store::PolicyStore;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

pub fn run_menu(store: &mut dyn PolicyStore, inventory: &dyn DeviceInventory) -> Result<()> {
    print_banner();

    for (i, scenario) in Scenario::ALL.iter().enumerate() {
        println!(
            "    {} {}",
            (i + 1).to_string().cyan().bold(),
            scenario.title()
        );
    }
    println!();
    print!("  Choose an option [1-{}]: ", Scenario::ALL.len());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let scenario = match input.trim_end_matches(['\r', '\n']) {
        "1" => Scenario::HidOnly,
        "2" => Scenario::StorageOnly,
        "3" => Scenario::RestoreDefaults,
        other => {
            println!();
            println!("  Invalid choice: '{}'", other);
            return Ok(());
        }
    };

    execute_scenario(scenario, store, inventory)?;
    Ok(())
}

fn print_banner() {
    println!();
    println!("  {}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".dimmed());
    println!(
        "  {}  {}",
        "usblock".bold(),
        "— USB device access lockdown".dimmed()
    );
    println!("  {}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".dimmed());
    println!();
}
