//! Fallback display service for targets without a display-settings adapter.
//!
//! Enumeration finds no devices and every mode change is rejected with
//! [`ModeChangeStatus::Failed`], so the controller surfaces a normal
//! `ModeApply` error instead of pretending to succeed.

use tracing::warn;
use vdisplay_core::{ChangeFlags, DeviceDescriptor, DisplayModeDescriptor, ModeChangeStatus};

use crate::application::display_controller::DisplayConfigService;

/// [`DisplayConfigService`] that supports nothing.
pub struct UnsupportedDisplayService;

impl UnsupportedDisplayService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnsupportedDisplayService {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayConfigService for UnsupportedDisplayService {
    fn enum_display_device(&self, _index: u32) -> Option<DeviceDescriptor> {
        None
    }

    fn current_mode(&self, _device_name: &str) -> Option<DisplayModeDescriptor> {
        None
    }

    fn apply_mode(
        &self,
        _mode: Option<DisplayModeDescriptor>,
        _flags: ChangeFlags,
    ) -> ModeChangeStatus {
        warn!(
            os = std::env::consts::OS,
            "display mode changes are not supported on this platform"
        );
        ModeChangeStatus::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_service_has_no_devices() {
        assert!(UnsupportedDisplayService::new().enum_display_device(0).is_none());
    }

    #[test]
    fn test_unsupported_service_rejects_every_change() {
        let service = UnsupportedDisplayService::new();
        assert_eq!(
            service.apply_mode(None, ChangeFlags::NONE),
            ModeChangeStatus::Failed
        );
    }
}
