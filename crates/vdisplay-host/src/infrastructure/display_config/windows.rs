//! Windows display configuration via the Win32 display-settings API.
//!
//! - `EnumDisplayDevicesW` walks display devices by index.
//! - `EnumDisplaySettingsW(ENUM_CURRENT_SETTINGS)` reads a device's mode.
//! - `ChangeDisplaySettingsW` applies a `DEVMODEW`, or reverts to the
//!   registry configuration when given no mode.
//!
//! The core crate's flag and status values are the Win32 values, so
//! conversion is a field-by-field copy.

use vdisplay_core::{
    ChangeFlags, DeviceDescriptor, DeviceStateFlags, DisplayModeDescriptor, ModeChangeStatus,
    ModeFields,
};

use ::windows::core::PCWSTR;
use ::windows::Win32::Graphics::Gdi::{
    ChangeDisplaySettingsW, EnumDisplayDevicesW, EnumDisplaySettingsW, CDS_TYPE, DEVMODEW,
    DEVMODE_FIELD_FLAGS, DISPLAY_DEVICEW, ENUM_CURRENT_SETTINGS,
};

use tracing::{debug, trace};

use crate::application::display_controller::DisplayConfigService;

/// Mode fields this adapter copies between `DEVMODEW` and the descriptor.
///
/// Position, orientation, and display flags read from a device are not
/// carried, so a cloned mode is applied at the default origin.
const KNOWN_FIELDS: u32 = ModeFields::PELS_WIDTH
    | ModeFields::PELS_HEIGHT
    | ModeFields::BITS_PER_PEL
    | ModeFields::DISPLAY_FREQUENCY;

/// Windows implementation of [`DisplayConfigService`] using Win32 APIs.
pub struct WindowsDisplayService;

impl WindowsDisplayService {
    /// Creates a new `WindowsDisplayService`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsDisplayService {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayConfigService for WindowsDisplayService {
    fn enum_display_device(&self, index: u32) -> Option<DeviceDescriptor> {
        let mut device = DISPLAY_DEVICEW {
            cb: std::mem::size_of::<DISPLAY_DEVICEW>() as u32,
            ..Default::default()
        };

        // SAFETY: `device` is a properly sized DISPLAY_DEVICEW on the stack
        // with `cb` set.  A null device name enumerates adapters.
        let found = unsafe { EnumDisplayDevicesW(PCWSTR::null(), index, &mut device, 0) };
        if !found.as_bool() {
            trace!(index, "display device enumeration exhausted");
            return None;
        }

        Some(DeviceDescriptor {
            name: wide_to_string(&device.DeviceName),
            description: wide_to_string(&device.DeviceString),
            state_flags: DeviceStateFlags(device.StateFlags.0),
        })
    }

    fn current_mode(&self, device_name: &str) -> Option<DisplayModeDescriptor> {
        let name = to_wide(device_name);
        let mut devmode = DEVMODEW {
            dmSize: std::mem::size_of::<DEVMODEW>() as u16,
            ..Default::default()
        };

        // SAFETY: `name` is NUL-terminated and outlives the call; `devmode`
        // is a properly sized DEVMODEW with `dmSize` set.
        let ok = unsafe {
            EnumDisplaySettingsW(PCWSTR(name.as_ptr()), ENUM_CURRENT_SETTINGS, &mut devmode)
        };
        if !ok.as_bool() {
            debug!(device = device_name, "EnumDisplaySettingsW failed");
            return None;
        }

        Some(DisplayModeDescriptor {
            width: devmode.dmPelsWidth,
            height: devmode.dmPelsHeight,
            bits_per_pixel: devmode.dmBitsPerPel,
            frequency: devmode.dmDisplayFrequency,
            fields: ModeFields(devmode.dmFields.0 & KNOWN_FIELDS),
        })
    }

    fn apply_mode(
        &self,
        mode: Option<DisplayModeDescriptor>,
        flags: ChangeFlags,
    ) -> ModeChangeStatus {
        let devmode = mode.map(to_devmode);
        let devmode_ptr = devmode.as_ref().map(|dm| dm as *const DEVMODEW);

        // SAFETY: when present, `devmode_ptr` points at `devmode`, which lives
        // until the end of this function.  `None` requests a revert.
        let result = unsafe { ChangeDisplaySettingsW(devmode_ptr, CDS_TYPE(flags.0)) };
        ModeChangeStatus::from_code(result.0)
    }
}

/// Builds a `DEVMODEW` carrying only the descriptor's known fields.
fn to_devmode(mode: DisplayModeDescriptor) -> DEVMODEW {
    DEVMODEW {
        dmSize: std::mem::size_of::<DEVMODEW>() as u16,
        dmPelsWidth: mode.width,
        dmPelsHeight: mode.height,
        dmBitsPerPel: mode.bits_per_pixel,
        dmDisplayFrequency: mode.frequency,
        dmFields: DEVMODE_FIELD_FLAGS(mode.fields.0 & KNOWN_FIELDS),
        ..Default::default()
    }
}

/// Encodes `s` as a NUL-terminated UTF-16 buffer.
fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Decodes a fixed-size, NUL-padded UTF-16 buffer.
fn wide_to_string(buf: &[u16]) -> String {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    String::from_utf16_lossy(&buf[..len])
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_round_trip_stops_at_nul() {
        let mut buf = [0u16; 32];
        let wide = to_wide(r"\\.\DISPLAY1");
        buf[..wide.len()].copy_from_slice(&wide);

        assert_eq!(wide_to_string(&buf), r"\\.\DISPLAY1");
    }

    #[test]
    fn test_to_devmode_copies_resolution_and_fields() {
        let mode = DisplayModeDescriptor::with_resolution(1280, 720, 32);

        let devmode = to_devmode(mode);

        assert_eq!(devmode.dmPelsWidth, 1280);
        assert_eq!(devmode.dmPelsHeight, 720);
        assert_eq!(devmode.dmBitsPerPel, 32);
        assert_eq!(devmode.dmFields.0, ModeFields::RESOLUTION_AND_DEPTH.0);
        assert_eq!(devmode.dmSize as usize, std::mem::size_of::<DEVMODEW>());
    }

    /// Read-only smoke test: enumeration must find at least one device on a
    /// machine with a desktop.  Mode changes are never exercised here because
    /// they would alter the test machine's display.
    #[test]
    fn test_windows_display_service_enumerates_a_primary_device() {
        let service = WindowsDisplayService::new();
        let mut index = 0;
        let mut saw_primary = false;
        while let Some(device) = service.enum_display_device(index) {
            saw_primary |= device.is_primary();
            index += 1;
        }
        if index > 0 {
            assert!(saw_primary, "an interactive session must have a primary device");
        }
    }

    #[test]
    fn test_windows_display_service_reads_primary_mode() {
        let service = WindowsDisplayService::new();
        let primary = (0..16)
            .map_while(|i| service.enum_display_device(i))
            .find(|d| d.is_primary());
        if let Some(primary) = primary {
            let mode = service.current_mode(&primary.name).expect("current mode");
            assert!(mode.width > 0 && mode.height > 0);
        }
    }
}
