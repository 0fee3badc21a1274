//! Host device inventory — hardware ids of currently attached input devices.
//!
//! Read-only: the ids feed the device allow-list write and nothing else.
//! An empty result just means no device of that class is attached right now;
//! the allow-list simply omits that class.

pub mod mock;
#[cfg(windows)]
pub mod windows;

pub use mock::MockInventory;
#[cfg(windows)]
pub use windows::ClassFilterInventory;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a device class/instance, e.g.
/// `HID\VID_046D&PID_C31C&REV_6402&MI_00`. Produced here, consumed only by
/// the allow-list write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareId(String);

impl HardwareId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HardwareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for HardwareId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HardwareId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Inventory seam. Implementations: live class-driver walk on Windows,
/// fixed ids for tests and `--mock-devices`.
pub trait DeviceInventory {
    /// Hardware ids of currently attached keyboards.
    fn keyboard_ids(&self) -> Result<Vec<HardwareId>>;

    /// Hardware ids of currently attached pointing devices.
    fn pointing_device_ids(&self) -> Result<Vec<HardwareId>>;
}
