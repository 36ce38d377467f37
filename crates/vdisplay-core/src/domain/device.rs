//! Enumerated display device records.

use serde::{Deserialize, Serialize};

/// State bits reported for each enumerated display device.
///
/// Bit values match the Win32 `DISPLAY_DEVICE_*` state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceStateFlags(pub u32);

impl DeviceStateFlags {
    pub const ATTACHED_TO_DESKTOP: u32 = 0x0000_0001;
    pub const PRIMARY_DEVICE: u32 = 0x0000_0004;
    pub const MIRRORING_DRIVER: u32 = 0x0000_0008;

    /// Returns `true` if the OS designates this device as the primary display.
    pub fn is_primary(&self) -> bool {
        self.0 & Self::PRIMARY_DEVICE != 0
    }

    /// Returns `true` if the device is part of the desktop.
    pub fn is_attached(&self) -> bool {
        self.0 & Self::ATTACHED_TO_DESKTOP != 0
    }

    /// Returns `true` for pseudo-devices that mirror another display.
    pub fn is_mirroring(&self) -> bool {
        self.0 & Self::MIRRORING_DRIVER != 0
    }
}

/// A display device as reported by one step of device enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// OS identifier of the device, e.g. `\\.\DISPLAY1`.
    pub name: String,
    /// Adapter description, e.g. the GPU model.  Informational only.
    pub description: String,
    /// Primary/attached/mirroring state bits.
    pub state_flags: DeviceStateFlags,
}

impl DeviceDescriptor {
    /// Creates a descriptor with an empty description.
    pub fn new(name: impl Into<String>, state_flags: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            state_flags: DeviceStateFlags(state_flags),
        }
    }

    /// Shorthand for `self.state_flags.is_primary()`.
    pub fn is_primary(&self) -> bool {
        self.state_flags.is_primary()
    }
}
