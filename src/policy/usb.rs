//! USB policy writer — the fixed key tables behind each lockdown scenario.
//!
//! Everything here is a blind, idempotent write: no read-before-write, no
//! merging, no rollback. Running an operation twice leaves the store exactly
//! as running it once does.

use crate::devices::HardwareId;
use crate::store::{KeyPath, PolicyStore, StoreError, Value};

/// Group-policy key holding the removable-storage restriction flags.
pub const REMOVABLE_STORAGE_PATH: &str =
    r"SOFTWARE\Policies\Microsoft\Windows\RemovableStorageDevices";

/// The four restriction flags written by `disable_removable_storage` and
/// removed by `restore_defaults`: deny all removable storage, and keep the
/// legacy per-class allowances explicitly off.
pub const RESTRICTION_FLAGS: [(&str, u32); 4] = [
    ("Deny_All", 1),
    ("Allow_Floppy", 0),
    ("Allow_CDROM", 0),
    ("Allow_Tape", 0),
];

/// Service key for the USB mass-storage class driver.
pub const STORAGE_DRIVER_PATH: &str = r"SYSTEM\CurrentControlSet\Services\USBSTOR";

/// Start-mode value under the driver service key.
pub const START_VALUE: &str = "Start";

/// Start-type code: driver never loaded.
pub const START_DISABLED: u32 = 4;

/// Start-type code: demand start — the OS default for USBSTOR.
pub const START_DEFAULT: u32 = 3;

/// Group-policy key holding the device-install restrictions.
pub const DEVICE_INSTALL_PATH: &str =
    r"SOFTWARE\Policies\Microsoft\Windows\DeviceInstall\Restrictions";

/// String-list value naming the hardware ids exempt from the restriction.
pub const ALLOW_LIST_VALUE: &str = "AllowDeviceIDs";

/// Write the four restriction flags and disable the storage class driver.
/// Five unconditional writes; the first failure aborts the remainder.
pub fn disable_removable_storage(store: &mut dyn PolicyStore) -> Result<(), StoreError> {
    let restrictions = KeyPath::new(REMOVABLE_STORAGE_PATH);
    for (name, flag) in RESTRICTION_FLAGS {
        store.set_value(&restrictions, name, Value::Integer(flag))?;
    }

    store.set_value(
        &KeyPath::new(STORAGE_DRIVER_PATH),
        START_VALUE,
        Value::Integer(START_DISABLED),
    )
}

/// Write the device allow-list as a single string-list value, replacing any
/// prior list in full — never merged or appended.
pub fn allow_devices(store: &mut dyn PolicyStore, ids: &[HardwareId]) -> Result<(), StoreError> {
    let list = ids.iter().map(|id| id.as_str().to_string()).collect();
    store.set_value(
        &KeyPath::new(DEVICE_INSTALL_PATH),
        ALLOW_LIST_VALUE,
        Value::StringList(list),
    )
}

/// Remove the restriction flags (best-effort) and reset the storage driver
/// to its default start type. The driver start mode is restored with an
/// explicit write, not a deletion — the service key must always hold a
/// well-defined start type.
pub fn restore_defaults(store: &mut dyn PolicyStore) -> Result<(), StoreError> {
    let restrictions = KeyPath::new(REMOVABLE_STORAGE_PATH);
    for (name, _) in RESTRICTION_FLAGS {
        store.remove_value(&restrictions, name);
    }

    store.set_value(
        &KeyPath::new(STORAGE_DRIVER_PATH),
        START_VALUE,
        Value::Integer(START_DEFAULT),
    )
}
