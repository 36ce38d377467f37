//! Diagnostic run: create a test display, then destroy it immediately.
//!
//! Every step is logged and recorded in a [`DiagnosticReport`].  Failures are
//! captured in the report rather than returned, so a single run always tells
//! the operator how far it got.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};
use vdisplay_core::{VirtualDisplayInfo, VirtualDisplayOptions};

use super::display_controller::{DisplayConfigService, DisplayController};
use super::list_devices::{list_devices, primary_device};

/// Outcome of one diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    pub os: &'static str,
    pub arch: &'static str,
    /// Number of display devices enumerated.
    pub device_count: usize,
    /// Name of the primary device, if one was found.
    pub primary_device: Option<String>,
    /// The test display, when creation succeeded.
    pub created: Option<VirtualDisplayInfo>,
    pub create_error: Option<String>,
    /// `true` once the test display has been destroyed again.
    pub destroyed: bool,
    pub destroy_error: Option<String>,
}

impl DiagnosticReport {
    /// Returns `true` when the display was both created and destroyed.
    pub fn passed(&self) -> bool {
        self.created.is_some() && self.destroyed
    }
}

/// The display the diagnostic run tries to create: 1920×1080 at 60 Hz.
pub fn diagnostic_options() -> VirtualDisplayOptions {
    VirtualDisplayOptions {
        width: 1920,
        height: 1080,
        frame_rate: Some(60),
        display_name: "Diagnostic Test Display".to_string(),
    }
}

/// Runs the create-then-destroy diagnostic against `service`.
pub fn run_diagnostic(service: Arc<dyn DisplayConfigService>) -> DiagnosticReport {
    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    info!(os, arch, "starting display diagnostic");

    let devices = list_devices(service.as_ref());
    let primary = primary_device(&devices).map(|r| r.device.name.clone());
    info!(count = devices.len(), primary = ?primary, "display devices enumerated");
    if primary.is_none() {
        warn!("no primary display device reported");
    }

    let mut report = DiagnosticReport {
        os,
        arch,
        device_count: devices.len(),
        primary_device: primary,
        created: None,
        create_error: None,
        destroyed: false,
        destroy_error: None,
    };

    let mut controller = DisplayController::new(service);
    let options = diagnostic_options();
    info!(?options, "creating test virtual display");
    match controller.create_with_options(&options) {
        Ok(created) => {
            info!(id = created.id.value(), "test display created");
            report.created = Some(created);
        }
        Err(e) => {
            error!("test display creation failed: {e}");
            report.create_error = Some(e.to_string());
            return report;
        }
    }

    match controller.destroy() {
        Ok(_) => {
            info!("test display destroyed");
            report.destroyed = true;
        }
        Err(e) => {
            error!("test display teardown failed: {e}");
            report.destroy_error = Some(e.to_string());
        }
    }
    report
}
