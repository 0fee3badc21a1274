//! Usblock — USB device access lockdown
//!
//! Toggles OS-level USB device access policy through the system policy
//! store and the storage class driver's start mode.
//!
//! Quick start (from an elevated shell):
//!   usblock            # interactive menu
//!   usblock apply storage-only
//!   usblock log        # see what the last run wrote
//!
//! For more info: usblock --help

// Suppress warnings for items that are public API (used by tests)
#![allow(dead_code, unused_imports)]

mod audit;
mod cli;
mod devices;
mod policy;
mod privilege;
mod scenario;
mod store;

use clap::{Parser, Subcommand};
use colored::Colorize;
use devices::DeviceInventory;
use scenario::Scenario;
use std::path::{Path, PathBuf};
use store::{FileStore, PolicyStore};

/// Usblock — lock down USB device access.
///
/// Presents three configurations: disable removable storage while
/// allow-listing the currently attached keyboard and mouse, disable
/// removable storage only, or restore the defaults. Every configuration is
/// confirmation-gated and requires administrative privileges.
#[derive(Parser)]
#[command(
    name = "usblock",
    version,
    about = "Lock down USB device access",
    long_about = "Usblock toggles OS-level USB device access policy: it can\n\
                  disable removable storage, allow-list the input devices you\n\
                  are using right now, and restore the defaults.\n\n\
                  Run it with no arguments from an elevated shell for the\n\
                  interactive menu. A restart is required after applying."
)]
struct Cli {
    /// Use a JSON file as the policy store instead of the system store
    /// (testing / dry-run; skips the privilege check)
    #[arg(long, global = true, hide = true, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Report a fixed device inventory instead of querying the host
    #[arg(long, global = true, hide = true)]
    mock_devices: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply one configuration directly (still asks for confirmation)
    Apply {
        /// Which configuration: hid-only, storage-only or restore
        scenario: String,
    },

    /// See what previous runs wrote
    Log {
        /// Show a specific session
        #[arg(short, long, help = "Session ID to view")]
        session: Option<String>,

        /// Limit number of entries shown
        #[arg(short, long, help = "Max entries to show (most recent)")]
        limit: Option<usize>,

        /// List all recorded sessions
        #[arg(long, help = "List all recorded sessions")]
        list: bool,
    },
}

fn main() {
    // Startup configuration happens once, here: tracing at warn level unless
    // RUST_LOG says otherwise.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("usblock=warn".parse().unwrap()),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        // ── Journal browsing needs neither store nor privileges ──
        Some(Commands::Log {
            session,
            limit,
            list,
        }) => {
            if list {
                cli::log::run_log_list()
            } else {
                cli::log::run_log(session.as_deref(), limit)
            }
        }

        // ── Everything else mutates the store ──
        Some(Commands::Apply { ref scenario }) => match Scenario::from_name(scenario) {
            Some(scenario) => with_store(&cli, |store, inventory| {
                cli::apply::execute_scenario(scenario, store, inventory).map(|_| ())
            }),
            None => Err(anyhow::anyhow!(
                "Unknown scenario '{}' — expected one of: hid-only, storage-only, restore",
                scenario
            )),
        },

        // ── No subcommand: interactive menu ──
        None => with_store(&cli, cli::menu::run_menu),
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        eprintln!();
        std::process::exit(1);
    }
}

/// Run the privilege guard, open the selected store backend and inventory,
/// and hand them to `f`.
fn with_store(
    cli: &Cli,
    f: impl FnOnce(&mut dyn PolicyStore, &dyn DeviceInventory) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    // The guard gates the system store; a file store needs no elevation.
    if cli.store.is_none() && !privilege::has_elevated_privileges() {
        eprintln!();
        eprintln!(
            "  {} Administrative privileges are required to change USB policy.",
            "✗".red().bold()
        );
        eprintln!("  Re-run usblock from an elevated shell.");
        eprintln!();
        std::process::exit(2);
    }

    let mut store = open_store(cli.store.as_deref())?;
    let inventory = device_inventory(cli.mock_devices);
    f(store.as_mut(), inventory.as_ref())
}

fn open_store(path: Option<&Path>) -> anyhow::Result<Box<dyn PolicyStore>> {
    match path {
        Some(path) => Ok(Box::new(FileStore::open(path)?)),
        None => open_system_store(),
    }
}

#[cfg(windows)]
fn open_system_store() -> anyhow::Result<Box<dyn PolicyStore>> {
    Ok(Box::new(store::RegistryStore::open_system()))
}

#[cfg(not(windows))]
fn open_system_store() -> anyhow::Result<Box<dyn PolicyStore>> {
    anyhow::bail!(
        "The system policy store is only available on Windows.\n\
         Pass --store <path> to work against a file-backed store."
    )
}

fn device_inventory(mock: bool) -> Box<dyn DeviceInventory> {
    if mock {
        return Box::new(devices::MockInventory::default());
    }

    #[cfg(windows)]
    {
        Box::new(devices::ClassFilterInventory::new())
    }
    #[cfg(not(windows))]
    {
        tracing::debug!("no live device inventory on this platform, using fixed ids");
        Box::new(devices::MockInventory::default())
    }
}
