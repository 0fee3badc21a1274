//! Elevated-privilege guard.
//!
//! Mutating the system policy store is gated on this check. It is a hard
//! precondition: a negative answer aborts the run before any side effect,
//! with no retry.

/// Whether the invoking principal can write the system policy store.
pub fn has_elevated_privileges() -> bool {
    imp::has_elevated_privileges()
}

#[cfg(windows)]
mod imp {
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_SET_VALUE};
    use winreg::RegKey;

    /// Probe: the machine policy root only opens for writing from an
    /// elevated process.
    pub fn has_elevated_privileges() -> bool {
        RegKey::predef(HKEY_LOCAL_MACHINE)
            .open_subkey_with_flags(r"SOFTWARE\Policies\Microsoft\Windows", KEY_SET_VALUE)
            .is_ok()
    }
}

#[cfg(unix)]
mod imp {
    /// Effective uid 0. Read from /proc where available, otherwise `id -u`.
    pub fn has_elevated_privileges() -> bool {
        if let Ok(status) = std::fs::read_to_string("/proc/self/status") {
            for line in status.lines() {
                if let Some(rest) = line.strip_prefix("Uid:") {
                    // Uid: real effective saved fs
                    let mut fields = rest.split_whitespace();
                    let effective = fields.nth(1);
                    return effective == Some("0");
                }
            }
        }

        std::process::Command::new("id")
            .arg("-u")
            .output()
            .map(|out| out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "0")
            .unwrap_or(false)
    }
}

#[cfg(not(any(windows, unix)))]
mod imp {
    pub fn has_elevated_privileges() -> bool {
        false
    }
}
