//! Mock display-configuration service for unit testing.
//!
//! # Why a mock service?
//!
//! The real adapter changes the resolution of the machine running the tests,
//! and the display configuration is machine-wide: two tests touching it at
//! once would race.  The `MockDisplayService` replaces all OS calls with an
//! in-memory device table and records every call in a `Mutex<Vec<...>>` so
//! assertions can inspect exactly what reached the OS boundary and in what
//! order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let service = Arc::new(MockDisplayService::single_1080p());
//! let mut controller = DisplayController::new(service.clone());
//!
//! controller.clone().unwrap();
//!
//! let applied = service.applied.lock().unwrap();
//! assert_eq!(applied[0].0.unwrap().width, 1920);
//! ```
//!
//! # Simulating failures
//!
//! Call [`MockDisplayService::fail_with`] to make every later `apply_mode`
//! return that status, and [`MockDisplayService::succeed`] to undo it.  The
//! call is still recorded.

use std::collections::HashMap;
use std::sync::Mutex;

use vdisplay_core::{
    ChangeFlags, DeviceDescriptor, DeviceStateFlags, DisplayModeDescriptor, ModeChangeStatus,
};

use crate::application::display_controller::DisplayConfigService;

/// An in-memory display service that records every call.
#[derive(Default)]
pub struct MockDisplayService {
    /// Devices returned by `enum_display_device`, in index order.
    pub devices: Vec<DeviceDescriptor>,
    /// Current mode per device name; a missing entry makes `current_mode` fail.
    pub modes: HashMap<String, DisplayModeDescriptor>,
    /// Every index passed to `enum_display_device`.
    pub enumerated: Mutex<Vec<u32>>,
    /// Every device name passed to `current_mode`.
    pub mode_queries: Mutex<Vec<String>>,
    /// Every (mode, flags) pair passed to `apply_mode`.
    pub applied: Mutex<Vec<(Option<DisplayModeDescriptor>, ChangeFlags)>>,
    /// Status returned by `apply_mode`; `None` means success.
    failure: Mutex<Option<ModeChangeStatus>>,
}

impl MockDisplayService {
    /// Creates a service with no devices whose changes always succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with one primary 1920×1080, 32 bpp device.
    ///
    /// This is the most common test fixture; it mirrors a typical
    /// single-monitor desktop.
    pub fn single_1080p() -> Self {
        Self::new().with_device(
            DeviceDescriptor::new(
                r"\\.\DISPLAY1",
                DeviceStateFlags::ATTACHED_TO_DESKTOP | DeviceStateFlags::PRIMARY_DEVICE,
            ),
            Some(DisplayModeDescriptor::with_resolution(1920, 1080, 32)),
        )
    }

    /// Appends a device, with its current mode if it should be readable.
    pub fn with_device(
        mut self,
        device: DeviceDescriptor,
        mode: Option<DisplayModeDescriptor>,
    ) -> Self {
        if let Some(mode) = mode {
            self.modes.insert(device.name.clone(), mode);
        }
        self.devices.push(device);
        self
    }

    /// Makes every later `apply_mode` call return `status`.
    pub fn fail_with(&self, status: ModeChangeStatus) {
        *self.failure.lock().unwrap() = Some(status);
    }

    /// Makes every later `apply_mode` call succeed again.
    pub fn succeed(&self) {
        *self.failure.lock().unwrap() = None;
    }
}

impl DisplayConfigService for MockDisplayService {
    fn enum_display_device(&self, index: u32) -> Option<DeviceDescriptor> {
        self.enumerated.lock().unwrap().push(index);
        self.devices.get(index as usize).cloned()
    }

    fn current_mode(&self, device_name: &str) -> Option<DisplayModeDescriptor> {
        self.mode_queries.lock().unwrap().push(device_name.to_string());
        self.modes.get(device_name).copied()
    }

    fn apply_mode(
        &self,
        mode: Option<DisplayModeDescriptor>,
        flags: ChangeFlags,
    ) -> ModeChangeStatus {
        self.applied.lock().unwrap().push((mode, flags));
        let failure = *self.failure.lock().unwrap();
        failure.unwrap_or(ModeChangeStatus::Successful)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
