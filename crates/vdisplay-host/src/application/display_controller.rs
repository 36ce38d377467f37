//! DisplayController: the virtual display lifecycle state machine.
//!
//! The controller owns three pieces of state:
//!
//! - a staged [`DisplayModeDescriptor`], filled in before every apply call,
//! - the last [`DeviceDescriptor`] seen during enumeration,
//! - a [`VirtualDisplayHandle`] that is `0` while inactive and `1` while active.
//!
//! Every OS interaction goes through a [`DisplayConfigService`] trait object
//! injected at construction time.  The platform-specific implementations are
//! in the infrastructure layer.
//!
//! # State machine
//!
//! ```text
//!            create / clone (OS success)
//!  Inactive ─────────────────────────────▶ Active
//!     ▲  │                                  │  │
//!     │  └─ destroy (revert, no-op)         │  └─ create / clone (re-apply,
//!     │                                     │     no teardown first)
//!     └──────────── destroy ────────────────┘
//! ```
//!
//! A failed OS call never moves the handle.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use vdisplay_core::{
    ChangeFlags, DeviceDescriptor, DisplayModeDescriptor, ModeChangeStatus, OptionsError,
    VirtualDisplayHandle, VirtualDisplayInfo, VirtualDisplayOptions,
};

/// The lifecycle operation that issued a mode-change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Clone,
    Destroy,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self {
            Operation::Create => "create",
            Operation::Clone => "clone",
            Operation::Destroy => "destroy",
        };
        f.write_str(verb)
    }
}

/// Error type for controller operations.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The OS reported that the requested mode change did not succeed.
    #[error("failed to {operation} virtual display: {status}")]
    ModeApply {
        operation: Operation,
        status: ModeChangeStatus,
    },

    /// Device enumeration finished without finding a primary display.
    #[error("no primary display device among {enumerated} enumerated devices")]
    NoPrimaryDevice { enumerated: u32 },

    /// The primary device's current mode could not be read.
    #[error("could not read the current mode of display device {device}")]
    ModeQuery { device: String },

    /// Caller-supplied options were rejected before any OS call.
    #[error("invalid virtual display options: {0}")]
    InvalidOptions(#[from] OptionsError),
}

impl DisplayError {
    /// The OS status carried by a [`DisplayError::ModeApply`], if any.
    pub fn status(&self) -> Option<ModeChangeStatus> {
        match self {
            DisplayError::ModeApply { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// OS display-configuration service consumed by the controller.
///
/// Each supported OS provides an implementation in the infrastructure layer.
pub trait DisplayConfigService: Send + Sync {
    /// Returns the display device at `index`, or `None` once `index` is past
    /// the last device.
    fn enum_display_device(&self, index: u32) -> Option<DeviceDescriptor>;

    /// Reads the mode currently in effect on `device_name`.
    fn current_mode(&self, device_name: &str) -> Option<DisplayModeDescriptor>;

    /// Applies `mode` with `flags`.  `None` reverts to the persisted
    /// configuration.
    fn apply_mode(&self, mode: Option<DisplayModeDescriptor>, flags: ChangeFlags)
        -> ModeChangeStatus;
}

/// Creates, clones, and destroys a single virtual display.
pub struct DisplayController {
    service: Arc<dyn DisplayConfigService>,
    mode: DisplayModeDescriptor,
    device: DeviceDescriptor,
    handle: VirtualDisplayHandle,
    /// Name reported by [`DisplayController::info`] while active.
    label: String,
}

impl DisplayController {
    /// Creates an inactive controller with zeroed staging buffers.
    pub fn new(service: Arc<dyn DisplayConfigService>) -> Self {
        Self {
            service,
            mode: DisplayModeDescriptor::zeroed(),
            device: DeviceDescriptor::default(),
            handle: VirtualDisplayHandle::NONE,
            label: String::new(),
        }
    }

    /// Applies the fixed 1280×720, 32 bpp mode and returns the active handle.
    ///
    /// Calling this while already active re-applies the mode without
    /// reverting first.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::ModeApply`] if the OS rejects the change; the
    /// handle keeps its previous value.
    pub fn create(&mut self) -> Result<VirtualDisplayHandle, DisplayError> {
        self.create_with_options(&VirtualDisplayOptions::default())
            .map(|info| info.id)
    }

    /// Applies the mode described by `options` and returns the active display.
    ///
    /// Depth is always 32 bpp.  A refresh rate is only requested when
    /// `options.frame_rate` is set.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::InvalidOptions`] before touching the OS when a
    /// dimension is zero, or [`DisplayError::ModeApply`] if the OS rejects the
    /// change.  The handle is unchanged on error.
    pub fn create_with_options(
        &mut self,
        options: &VirtualDisplayOptions,
    ) -> Result<VirtualDisplayInfo, DisplayError> {
        options.validate()?;

        self.mode = options.to_mode();
        if self.handle.is_active() {
            debug!("virtual display already active; re-applying without teardown");
        }
        self.apply_staged(Operation::Create)?;

        self.handle = VirtualDisplayHandle::ACTIVE;
        self.label = options.display_name.clone();
        info!(
            handle = self.handle.value(),
            width = self.mode.width,
            height = self.mode.height,
            name = %self.label,
            "virtual display created"
        );
        Ok(self.active_info())
    }

    /// Applies the primary display's current mode and returns the active handle.
    ///
    /// The display is labelled [`VirtualDisplayOptions::DEFAULT_NAME`].
    ///
    /// # Errors
    ///
    /// See [`DisplayController::clone_with_name`].
    pub fn clone(&mut self) -> Result<VirtualDisplayHandle, DisplayError> {
        self.clone_with_name(VirtualDisplayOptions::DEFAULT_NAME)
            .map(|info| info.id)
    }

    /// Applies the primary display's current mode and returns the active
    /// display, labelled `name`.
    ///
    /// Devices are enumerated in OS order; the first one flagged primary is the
    /// clone source even if later devices are flagged primary too.
    ///
    /// # Errors
    ///
    /// - [`DisplayError::NoPrimaryDevice`] if enumeration ends without a
    ///   primary device.
    /// - [`DisplayError::ModeQuery`] if the primary device's mode cannot be read.
    /// - [`DisplayError::ModeApply`] if the OS rejects the change.
    ///
    /// In every error case the handle keeps its previous value.
    pub fn clone_with_name(&mut self, name: &str) -> Result<VirtualDisplayInfo, DisplayError> {
        let mut index = 0;
        let mut found_primary = false;
        while let Some(device) = self.service.enum_display_device(index) {
            index += 1;
            self.device = device;
            if self.device.is_primary() {
                found_primary = true;
                break;
            }
        }

        if !found_primary {
            warn!(enumerated = index, "no primary display device to clone");
            return Err(DisplayError::NoPrimaryDevice { enumerated: index });
        }
        debug!(device = %self.device.name, "primary display device selected");

        self.mode = self
            .service
            .current_mode(&self.device.name)
            .ok_or_else(|| DisplayError::ModeQuery {
                device: self.device.name.clone(),
            })?;
        self.apply_staged(Operation::Clone)?;

        self.handle = VirtualDisplayHandle::ACTIVE;
        self.label = name.to_string();
        info!(
            handle = self.handle.value(),
            device = %self.device.name,
            mode = %self.mode,
            name = %self.label,
            "virtual display cloned from primary device"
        );
        Ok(self.active_info())
    }

    /// Reverts the OS to its persisted configuration and returns handle `0`.
    ///
    /// Legal while inactive: the revert is still requested and succeeds as a
    /// no-op on an unchanged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DisplayError::ModeApply`] if the OS rejects the revert; the
    /// handle keeps its previous value.
    pub fn destroy(&mut self) -> Result<VirtualDisplayHandle, DisplayError> {
        let was_active = self.handle.is_active();

        let status = self.service.apply_mode(None, ChangeFlags::NONE);
        if !status.is_success() {
            warn!(code = status.code(), "revert to persisted display settings failed");
            return Err(DisplayError::ModeApply {
                operation: Operation::Destroy,
                status,
            });
        }

        self.handle = VirtualDisplayHandle::NONE;
        self.label.clear();
        if was_active {
            info!("virtual display destroyed");
        } else {
            debug!("destroy on inactive controller; display settings reverted");
        }
        Ok(self.handle)
    }

    /// The current handle (`0` while inactive).
    pub fn handle(&self) -> VirtualDisplayHandle {
        self.handle
    }

    /// Returns `true` while a virtual display is active.
    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }

    /// The mode descriptor staged for the most recent apply call.
    pub fn staged_mode(&self) -> &DisplayModeDescriptor {
        &self.mode
    }

    /// The device descriptor left by the most recent enumeration.
    pub fn staged_device(&self) -> &DeviceDescriptor {
        &self.device
    }

    /// Describes the active virtual display, or `None` while inactive.
    pub fn info(&self) -> Option<VirtualDisplayInfo> {
        self.handle.is_active().then(|| self.active_info())
    }

    fn active_info(&self) -> VirtualDisplayInfo {
        VirtualDisplayInfo {
            id: self.handle,
            width: self.mode.width,
            height: self.mode.height,
            name: self.label.clone(),
        }
    }

    /// Sends the staged mode as a persisted, no-reset change.
    fn apply_staged(&self, operation: Operation) -> Result<(), DisplayError> {
        debug!(%operation, mode = %self.mode, "requesting display mode change");
        let status = self
            .service
            .apply_mode(Some(self.mode), ChangeFlags::PERSIST_NO_RESET);
        if status.is_success() {
            return Ok(());
        }
        warn!(%operation, code = status.code(), "display mode change rejected: {status}");
        Err(DisplayError::ModeApply { operation, status })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::display_config::mock::MockDisplayService;
    use vdisplay_core::{DeviceStateFlags, ModeFields};

    const PRIMARY: u32 = DeviceStateFlags::ATTACHED_TO_DESKTOP | DeviceStateFlags::PRIMARY_DEVICE;
    const SECONDARY: u32 = DeviceStateFlags::ATTACHED_TO_DESKTOP;

    mockall::mock! {
        Service {}
        impl DisplayConfigService for Service {
            fn enum_display_device(&self, index: u32) -> Option<DeviceDescriptor>;
            fn current_mode(&self, device_name: &str) -> Option<DisplayModeDescriptor>;
            fn apply_mode(
                &self,
                mode: Option<DisplayModeDescriptor>,
                flags: ChangeFlags,
            ) -> ModeChangeStatus;
        }
    }

    fn controller_with(service: MockDisplayService) -> (DisplayController, Arc<MockDisplayService>) {
        let service = Arc::new(service);
        (DisplayController::new(service.clone()), service)
    }

    // ── Construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_new_controller_is_inactive_with_zeroed_buffers() {
        let (controller, _) = controller_with(MockDisplayService::new());

        assert_eq!(controller.handle(), VirtualDisplayHandle::NONE);
        assert!(!controller.is_active());
        assert_eq!(*controller.staged_mode(), DisplayModeDescriptor::zeroed());
        assert_eq!(*controller.staged_device(), DeviceDescriptor::default());
        assert!(controller.info().is_none());
    }

    // ── create ────────────────────────────────────────────────────────────────

    #[test]
    fn test_create_on_fresh_controller_returns_active_handle() {
        // Arrange
        let (mut controller, _) = controller_with(MockDisplayService::new());

        // Act
        let handle = controller.create().expect("create");

        // Assert
        assert_eq!(handle, VirtualDisplayHandle::ACTIVE);
        assert!(controller.is_active());
    }

    #[test]
    fn test_create_stages_fixed_mode_with_three_fields() {
        // Arrange
        let (mut controller, service) = controller_with(MockDisplayService::new());

        // Act
        controller.create().expect("create");

        // Assert: the exact descriptor reaches the service boundary.
        let applied = service.applied.lock().unwrap();
        assert_eq!(applied.len(), 1);
        let (mode, flags) = applied[0];
        let mode = mode.expect("create must send a target mode");
        assert_eq!((mode.width, mode.height, mode.bits_per_pixel), (1280, 720, 32));
        assert_eq!(mode.fields, ModeFields::RESOLUTION_AND_DEPTH);
        assert_eq!(flags, ChangeFlags::PERSIST_NO_RESET);
        assert_eq!(*controller.staged_mode(), mode);
    }

    #[test]
    fn test_create_failure_leaves_handle_inactive() {
        // Arrange
        let (mut controller, service) = controller_with(MockDisplayService::new());
        service.fail_with(ModeChangeStatus::BadMode);

        // Act
        let result = controller.create();

        // Assert
        match result {
            Err(DisplayError::ModeApply { operation, status }) => {
                assert_eq!(operation, Operation::Create);
                assert_eq!(status, ModeChangeStatus::BadMode);
            }
            other => panic!("expected ModeApply error, got {other:?}"),
        }
        assert_eq!(controller.handle(), VirtualDisplayHandle::NONE);
    }

    #[test]
    fn test_create_failure_while_active_keeps_active_handle() {
        let (mut controller, service) = controller_with(MockDisplayService::new());
        controller.create().expect("first create");

        service.fail_with(ModeChangeStatus::Failed);
        assert!(controller.create().is_err());

        assert_eq!(controller.handle(), VirtualDisplayHandle::ACTIVE);
    }

    #[test]
    fn test_create_with_options_returns_info_with_requested_size() {
        let (mut controller, service) = controller_with(MockDisplayService::new());
        let options = VirtualDisplayOptions {
            width: 1920,
            height: 1080,
            frame_rate: Some(60),
            display_name: "My Virtual Monitor".to_string(),
        };

        let info = controller.create_with_options(&options).expect("create");

        assert_eq!(info.id, VirtualDisplayHandle::ACTIVE);
        assert_eq!((info.width, info.height), (1920, 1080));
        assert_eq!(info.name, "My Virtual Monitor");
        let (mode, _) = service.applied.lock().unwrap()[0];
        assert_eq!(mode.and_then(|m| m.requested_frequency()), Some(60));
    }

    #[test]
    fn test_create_with_invalid_options_never_reaches_service() {
        let (mut controller, service) = controller_with(MockDisplayService::new());
        let options = VirtualDisplayOptions {
            width: 0,
            ..Default::default()
        };

        let result = controller.create_with_options(&options);

        assert!(matches!(
            result,
            Err(DisplayError::InvalidOptions(OptionsError::ZeroWidth))
        ));
        assert!(service.applied.lock().unwrap().is_empty());
        assert!(!controller.is_active());
    }

    #[test]
    fn test_create_twice_reapplies_without_revert() {
        let mut mock = MockService::new();
        mock.expect_apply_mode()
            .withf(|mode: &Option<DisplayModeDescriptor>, flags: &ChangeFlags| {
                mode.is_some() && *flags == ChangeFlags::PERSIST_NO_RESET
            })
            .times(2)
            .return_const(ModeChangeStatus::Successful);
        let mut controller = DisplayController::new(Arc::new(mock));

        assert_eq!(controller.create().expect("first"), VirtualDisplayHandle::ACTIVE);
        assert_eq!(controller.create().expect("second"), VirtualDisplayHandle::ACTIVE);
    }

    // ── clone ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_clone_applies_primary_device_mode() {
        // Arrange
        let (mut controller, service) = controller_with(MockDisplayService::single_1080p());

        // Act
        let handle = controller.clone().expect("clone");

        // Assert
        assert_eq!(handle, VirtualDisplayHandle::ACTIVE);
        let staged = controller.staged_mode();
        assert_eq!((staged.width, staged.height, staged.bits_per_pixel), (1920, 1080, 32));
        assert_eq!(controller.staged_device().name, r"\\.\DISPLAY1");
        let applied = service.applied.lock().unwrap();
        assert_eq!(applied[0], (Some(*staged), ChangeFlags::PERSIST_NO_RESET));
    }

    #[test]
    fn test_clone_skips_secondary_devices_before_primary() {
        let service = MockDisplayService::new()
            .with_device(
                DeviceDescriptor::new(r"\\.\DISPLAY1", SECONDARY),
                Some(DisplayModeDescriptor::with_resolution(1024, 768, 16)),
            )
            .with_device(
                DeviceDescriptor::new(r"\\.\DISPLAY2", PRIMARY),
                Some(DisplayModeDescriptor::with_resolution(2560, 1440, 32)),
            );
        let (mut controller, service) = controller_with(service);

        controller.clone().expect("clone");

        assert_eq!(controller.staged_mode().width, 2560);
        assert_eq!(*service.mode_queries.lock().unwrap(), vec![r"\\.\DISPLAY2".to_string()]);
    }

    #[test]
    fn test_clone_uses_first_of_several_primary_devices() {
        let mut mock = MockService::new();
        mock.expect_enum_display_device().returning(|index| match index {
            0 => Some(DeviceDescriptor::new(r"\\.\DISPLAY1", SECONDARY)),
            1 => Some(DeviceDescriptor::new(r"\\.\DISPLAY2", PRIMARY)),
            2 => Some(DeviceDescriptor::new(r"\\.\DISPLAY3", PRIMARY)),
            _ => None,
        });
        mock.expect_current_mode()
            .withf(|name: &str| name == r"\\.\DISPLAY2")
            .times(1)
            .return_const(Some(DisplayModeDescriptor::with_resolution(1920, 1080, 32)));
        mock.expect_apply_mode()
            .times(1)
            .return_const(ModeChangeStatus::Successful);
        let mut controller = DisplayController::new(Arc::new(mock));

        controller.clone().expect("clone");

        assert_eq!(controller.staged_device().name, r"\\.\DISPLAY2");
    }

    #[test]
    fn test_clone_without_primary_device_fails_without_applying() {
        let mut mock = MockService::new();
        mock.expect_enum_display_device().returning(|index| match index {
            0 => Some(DeviceDescriptor::new(r"\\.\DISPLAY1", SECONDARY)),
            _ => None,
        });
        mock.expect_current_mode().times(0);
        mock.expect_apply_mode().times(0);
        let mut controller = DisplayController::new(Arc::new(mock));

        let result = controller.clone();

        assert!(matches!(
            result,
            Err(DisplayError::NoPrimaryDevice { enumerated: 1 })
        ));
        assert!(!controller.is_active());
    }

    #[test]
    fn test_clone_with_no_devices_reports_zero_enumerated() {
        let (mut controller, service) = controller_with(MockDisplayService::new());

        let result = controller.clone();

        assert!(matches!(
            result,
            Err(DisplayError::NoPrimaryDevice { enumerated: 0 })
        ));
        assert!(service.applied.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clone_with_unreadable_mode_fails_without_applying() {
        let service = MockDisplayService::new()
            .with_device(DeviceDescriptor::new(r"\\.\DISPLAY1", PRIMARY), None);
        let (mut controller, service) = controller_with(service);

        let result = controller.clone();

        match result {
            Err(DisplayError::ModeQuery { device }) => assert_eq!(device, r"\\.\DISPLAY1"),
            other => panic!("expected ModeQuery error, got {other:?}"),
        }
        assert!(service.applied.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clone_failure_leaves_handle_unchanged() {
        let (mut controller, service) = controller_with(MockDisplayService::single_1080p());
        service.fail_with(ModeChangeStatus::NotUpdated);

        let err = controller.clone().expect_err("clone must fail");

        assert_eq!(err.status(), Some(ModeChangeStatus::NotUpdated));
        assert_eq!(controller.handle(), VirtualDisplayHandle::NONE);
    }

    #[test]
    fn test_clone_info_uses_default_name() {
        let (mut controller, _) = controller_with(MockDisplayService::single_1080p());
        controller.clone().expect("clone");

        let info = controller.info().expect("active");
        assert_eq!(info.name, VirtualDisplayOptions::DEFAULT_NAME);
        assert_eq!((info.width, info.height), (1920, 1080));
    }

    #[test]
    fn test_clone_with_name_returns_info_with_primary_size() {
        // Arrange
        let (mut controller, service) = controller_with(MockDisplayService::single_1080p());

        // Act
        let info = controller.clone_with_name("Mirror Surface").expect("clone");

        // Assert
        assert_eq!(info.id, VirtualDisplayHandle::ACTIVE);
        assert_eq!((info.width, info.height), (1920, 1080));
        assert_eq!(info.name, "Mirror Surface");
        assert_eq!(controller.info(), Some(info));
        assert_eq!(controller.staged_device().name, r"\\.\DISPLAY1");
        assert_eq!(service.applied.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_clone_with_name_failure_keeps_previous_label() {
        let (mut controller, service) = controller_with(MockDisplayService::single_1080p());
        controller.create().expect("create");
        service.fail_with(ModeChangeStatus::BadMode);

        controller
            .clone_with_name("Mirror Surface")
            .expect_err("clone must fail");

        let info = controller.info().expect("still active");
        assert_eq!(info.name, VirtualDisplayOptions::DEFAULT_NAME);
    }

    // ── destroy ───────────────────────────────────────────────────────────────

    #[test]
    fn test_destroy_on_fresh_controller_returns_zero() {
        let (mut controller, _) = controller_with(MockDisplayService::new());

        let handle = controller.destroy().expect("destroy");

        assert_eq!(handle, VirtualDisplayHandle::NONE);
    }

    #[test]
    fn test_destroy_sends_revert_without_mode_or_flags() {
        let mut mock = MockService::new();
        mock.expect_apply_mode()
            .withf(|mode: &Option<DisplayModeDescriptor>, flags: &ChangeFlags| {
                mode.is_none() && *flags == ChangeFlags::NONE
            })
            .times(1)
            .return_const(ModeChangeStatus::Successful);
        let mut controller = DisplayController::new(Arc::new(mock));

        assert_eq!(controller.destroy().expect("destroy"), VirtualDisplayHandle::NONE);
    }

    #[test]
    fn test_destroy_after_create_resets_handle() {
        let (mut controller, _) = controller_with(MockDisplayService::new());
        controller.create().expect("create");

        controller.destroy().expect("destroy");

        assert!(!controller.is_active());
        assert!(controller.info().is_none());
    }

    #[test]
    fn test_destroy_failure_keeps_active_handle() {
        let (mut controller, service) = controller_with(MockDisplayService::new());
        controller.create().expect("create");
        service.fail_with(ModeChangeStatus::Failed);

        let err = controller.destroy().expect_err("destroy must fail");

        assert!(matches!(
            err,
            DisplayError::ModeApply {
                operation: Operation::Destroy,
                ..
            }
        ));
        assert_eq!(controller.handle(), VirtualDisplayHandle::ACTIVE);
    }

    #[test]
    fn test_mode_apply_error_message_names_operation() {
        let err = DisplayError::ModeApply {
            operation: Operation::Clone,
            status: ModeChangeStatus::BadMode,
        };
        let text = err.to_string();
        assert!(text.starts_with("failed to clone virtual display"), "got {text}");
        assert!(text.contains("-2"), "got {text}");
    }
}
