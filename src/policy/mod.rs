pub mod usb;

pub use usb::{allow_devices, disable_removable_storage, restore_defaults};
