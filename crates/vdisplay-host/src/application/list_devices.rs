//! Device listing: every enumerated display device with its current mode.

use serde::Serialize;
use tracing::debug;
use vdisplay_core::{DeviceDescriptor, DisplayModeDescriptor};

use super::display_controller::DisplayConfigService;

/// One row of the device listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceReport {
    /// Enumeration index.
    pub index: u32,
    pub device: DeviceDescriptor,
    pub primary: bool,
    /// Part of the desktop; detached adapters usually report no mode.
    pub attached: bool,
    pub mirroring: bool,
    /// `None` when the OS could not report a mode (e.g. detached adapters).
    pub current_mode: Option<DisplayModeDescriptor>,
}

/// Enumerates all devices in OS order and reads each one's current mode.
pub fn list_devices(service: &dyn DisplayConfigService) -> Vec<DeviceReport> {
    let mut reports = Vec::new();
    let mut index = 0;
    while let Some(device) = service.enum_display_device(index) {
        let current_mode = service.current_mode(&device.name);
        let flags = device.state_flags;
        debug!(
            index,
            device = %device.name,
            primary = flags.is_primary(),
            attached = flags.is_attached(),
            "enumerated display device"
        );
        reports.push(DeviceReport {
            index,
            primary: flags.is_primary(),
            attached: flags.is_attached(),
            mirroring: flags.is_mirroring(),
            device,
            current_mode,
        });
        index += 1;
    }
    reports
}

/// Returns the first report flagged primary.
pub fn primary_device(reports: &[DeviceReport]) -> Option<&DeviceReport> {
    reports.iter().find(|r| r.device.is_primary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::display_config::mock::MockDisplayService;
    use vdisplay_core::DeviceStateFlags;

    #[test]
    fn test_list_devices_reports_every_device_in_order() {
        // Arrange
        let service = MockDisplayService::single_1080p().with_device(
            DeviceDescriptor::new(r"\\.\DISPLAY2", DeviceStateFlags::ATTACHED_TO_DESKTOP),
            None,
        );

        // Act
        let reports = list_devices(&service);

        // Assert
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].index, 0);
        assert_eq!(reports[1].device.name, r"\\.\DISPLAY2");
        assert_eq!(reports[0].current_mode.map(|m| m.width), Some(1920));
        assert!(reports[1].current_mode.is_none());
    }

    #[test]
    fn test_list_devices_reports_state_bits() {
        let service = MockDisplayService::single_1080p().with_device(
            DeviceDescriptor::new(r"\\.\DISPLAYV1", DeviceStateFlags::MIRRORING_DRIVER),
            None,
        );

        let reports = list_devices(&service);

        assert!(reports[0].primary && reports[0].attached && !reports[0].mirroring);
        assert!(!reports[1].primary && !reports[1].attached && reports[1].mirroring);
    }

    #[test]
    fn test_list_devices_with_no_devices_is_empty() {
        let service = MockDisplayService::new();
        assert!(list_devices(&service).is_empty());
    }

    #[test]
    fn test_primary_device_finds_flagged_device() {
        let reports = list_devices(&MockDisplayService::single_1080p());
        let primary = primary_device(&reports).expect("primary");
        assert_eq!(primary.device.name, r"\\.\DISPLAY1");
    }
}
