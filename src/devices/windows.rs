//! Live device inventory from the class driver enum lists.
//!
//! The kbdclass/mouclass service keys list the device instances currently
//! bound to the keyboard and pointing-device class drivers; each instance's
//! `HardwareID` multi-string lives under the Enum tree. Walking these needs
//! only registry reads — no device-manager API binding.

use crate::devices::{DeviceInventory, HardwareId};
use anyhow::Result;
use winreg::enums::HKEY_LOCAL_MACHINE;
use winreg::RegKey;

const KEYBOARD_CLASS_SERVICE: &str = "kbdclass";
const POINTING_CLASS_SERVICE: &str = "mouclass";

pub struct ClassFilterInventory;

impl ClassFilterInventory {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClassFilterInventory {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceInventory for ClassFilterInventory {
    fn keyboard_ids(&self) -> Result<Vec<HardwareId>> {
        Ok(class_hardware_ids(KEYBOARD_CLASS_SERVICE))
    }

    fn pointing_device_ids(&self) -> Result<Vec<HardwareId>> {
        Ok(class_hardware_ids(POINTING_CLASS_SERVICE))
    }
}

/// First hardware id of every instance currently bound to `service`.
/// A missing Enum key or unreadable instance means no device of that class
/// is attached (or visible) — returned as an empty list, never an error.
fn class_hardware_ids(service: &str) -> Vec<HardwareId> {
    let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);

    let enum_key = match hklm.open_subkey(format!(
        r"SYSTEM\CurrentControlSet\Services\{}\Enum",
        service
    )) {
        Ok(key) => key,
        Err(_) => return Vec::new(),
    };

    let count: u32 = enum_key.get_value("Count").unwrap_or(0);

    (0..count)
        .filter_map(|i| enum_key.get_value::<String, _>(i.to_string()).ok())
        .filter_map(|instance| first_hardware_id(&hklm, &instance))
        .collect()
}

/// Resolve an instance path like `HID\VID_xxxx&PID_xxxx\6&...` to the first
/// entry of its `HardwareID` multi-string.
fn first_hardware_id(hklm: &RegKey, instance: &str) -> Option<HardwareId> {
    let key = hklm
        .open_subkey(format!(r"SYSTEM\CurrentControlSet\Enum\{}", instance))
        .ok()?;
    let ids: Vec<String> = key.get_value("HardwareID").ok()?;
    ids.into_iter().next().map(HardwareId::from)
}
