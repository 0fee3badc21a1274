//! Fixed device inventory (for testing and the `--mock-devices` flag).

use crate::devices::{DeviceInventory, HardwareId};
use anyhow::Result;

/// Inventory that reports a fixed set of ids without touching the host.
pub struct MockInventory {
    keyboards: Vec<HardwareId>,
    pointing_devices: Vec<HardwareId>,
}

impl MockInventory {
    pub fn new(
        keyboards: Vec<HardwareId>,
        pointing_devices: Vec<HardwareId>,
    ) -> Self {
        Self {
            keyboards,
            pointing_devices,
        }
    }

    /// Inventory with no attached devices of either class.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl Default for MockInventory {
    fn default() -> Self {
        Self::new(
            vec![HardwareId::from("KBD1")],
            vec![HardwareId::from("MOU1")],
        )
    }
}

impl DeviceInventory for MockInventory {
    fn keyboard_ids(&self) -> Result<Vec<HardwareId>> {
        Ok(self.keyboards.clone())
    }

    fn pointing_device_ids(&self) -> Result<Vec<HardwareId>> {
        Ok(self.pointing_devices.clone())
    }
}
