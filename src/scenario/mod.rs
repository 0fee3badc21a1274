//! Scenario orchestrator — the three lockdown configurations and the
//! one-pass state machine that applies them.
//!
//! One transition chain per run: Idle → AwaitingConfirmation → Applying →
//! Done, with anything but an exact affirmative diverting to Cancelled.
//! Once Applying starts there is no mid-sequence cancellation; a failed
//! write aborts the remainder and the repair path is to re-run the scenario
//! (every write is independently idempotent).

pub mod prompt;

pub use prompt::{ConfirmPrompt, ScriptedPrompt, TerminalPrompt};

use crate::devices::DeviceInventory;
use crate::policy;
use crate::store::PolicyStore;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;

/// The user-selectable configurations. Selected once per run, immutable
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Disable removable storage and allow-list only the currently attached
    /// keyboards and pointing devices.
    HidOnly,
    /// Disable removable storage, leave device installation alone.
    StorageOnly,
    /// Remove the restrictions and reset the storage driver start mode.
    RestoreDefaults,
}

impl Scenario {
    /// All scenarios, in menu order.
    pub const ALL: [Scenario; 3] = [
        Scenario::HidOnly,
        Scenario::StorageOnly,
        Scenario::RestoreDefaults,
    ];

    /// Stable name used on the command line and in the journal.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::HidOnly => "hid-only",
            Scenario::StorageOnly => "storage-only",
            Scenario::RestoreDefaults => "restore",
        }
    }

    pub fn from_name(name: &str) -> Option<Scenario> {
        match name {
            "hid-only" => Some(Scenario::HidOnly),
            "storage-only" => Some(Scenario::StorageOnly),
            "restore" => Some(Scenario::RestoreDefaults),
            _ => None,
        }
    }

    /// Menu line shown in the interactive menu.
    pub fn title(&self) -> &'static str {
        match self {
            Scenario::HidOnly => "Lock down USB — allow current keyboard and mouse only",
            Scenario::StorageOnly => "Lock down USB storage only",
            Scenario::RestoreDefaults => "Restore default USB policy",
        }
    }

    /// Explanatory text printed before the confirmation prompt.
    pub fn explanation(&self) -> &'static str {
        match self {
            Scenario::HidOnly => {
                "Disables removable storage devices and restricts device\n\
                 installation to the keyboards and pointing devices attached\n\
                 right now. Other USB devices will be rejected."
            }
            Scenario::StorageOnly => {
                "Disables removable storage devices (USB drives, external\n\
                 disks, optical media). Keyboards, mice and other non-storage\n\
                 devices keep working and new ones can still be installed."
            }
            Scenario::RestoreDefaults => {
                "Removes the removable-storage restrictions and re-enables\n\
                 the USB storage driver with its default start mode."
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// States of one orchestrator pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    AwaitingConfirmation,
    Applying,
    Done,
    Cancelled,
}

/// Result of a run that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Cancelled,
}

pub struct Orchestrator<'a> {
    store: &'a mut dyn PolicyStore,
    inventory: &'a dyn DeviceInventory,
    prompt: &'a mut dyn ConfirmPrompt,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        store: &'a mut dyn PolicyStore,
        inventory: &'a dyn DeviceInventory,
        prompt: &'a mut dyn ConfirmPrompt,
    ) -> Self {
        Self {
            store,
            inventory,
            prompt,
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run one scenario to completion or cancellation.
    pub fn run(&mut self, scenario: Scenario) -> Result<Outcome> {
        self.state = RunState::AwaitingConfirmation;

        let confirmed = self
            .prompt
            .confirm(scenario)
            .context("Failed to read confirmation")?;

        if !confirmed {
            self.state = RunState::Cancelled;
            println!();
            println!("  Operation cancelled.");
            return Ok(Outcome::Cancelled);
        }

        self.state = RunState::Applying;
        tracing::info!("applying scenario '{}'", scenario);
        self.apply(scenario)
            .with_context(|| format!("Failed to apply scenario '{}'", scenario))?;
        self.state = RunState::Done;

        println!();
        println!("  {} Configuration applied.", "✓".green().bold());
        println!("  A system restart is required for the new policy to take effect.");
        Ok(Outcome::Applied)
    }

    fn apply(&mut self, scenario: Scenario) -> Result<()> {
        match scenario {
            Scenario::HidOnly => {
                policy::disable_removable_storage(self.store)?;

                // Keyboard ids first, then pointing devices
                let mut ids = self.inventory.keyboard_ids()?;
                ids.extend(self.inventory.pointing_device_ids()?);
                tracing::debug!("allow-listing {} input device id(s)", ids.len());

                policy::allow_devices(self.store, &ids)?;
            }
            Scenario::StorageOnly => {
                policy::disable_removable_storage(self.store)?;
            }
            Scenario::RestoreDefaults => {
                policy::restore_defaults(self.store)?;
            }
        }
        Ok(())
    }
}
