//! Caller-facing creation options and result info.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::handle::VirtualDisplayHandle;
use super::mode::DisplayModeDescriptor;

/// Error type for invalid [`VirtualDisplayOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("width must be a positive integer")]
    ZeroWidth,
    #[error("height must be a positive integer")]
    ZeroHeight,
    #[error("frame rate must be a positive integer when given")]
    ZeroFrameRate,
}

/// Parameters for creating a virtual display.
///
/// [`VirtualDisplayOptions::default`] describes exactly the fixed mode that
/// `DisplayController::create` applies: 1280×720 at 32 bpp, no explicit
/// refresh rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDisplayOptions {
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// Requested refresh rate in Hz; `None` leaves it to the driver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    /// Label used in logs and in the returned [`VirtualDisplayInfo`].
    pub display_name: String,
}

impl VirtualDisplayOptions {
    pub const DEFAULT_WIDTH: u32 = 1280;
    pub const DEFAULT_HEIGHT: u32 = 720;
    pub const DEFAULT_NAME: &'static str = "Virtual Display";

    /// Checks that every dimension is positive.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionsError`] found, checking width, then height,
    /// then frame rate.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.width == 0 {
            return Err(OptionsError::ZeroWidth);
        }
        if self.height == 0 {
            return Err(OptionsError::ZeroHeight);
        }
        if self.frame_rate == Some(0) {
            return Err(OptionsError::ZeroFrameRate);
        }
        Ok(())
    }

    /// Builds the mode descriptor these options stage.
    ///
    /// Depth is always [`DisplayModeDescriptor::DEFAULT_BITS_PER_PIXEL`].
    pub fn to_mode(&self) -> DisplayModeDescriptor {
        let mode = DisplayModeDescriptor::with_resolution(
            self.width,
            self.height,
            DisplayModeDescriptor::DEFAULT_BITS_PER_PIXEL,
        );
        match self.frame_rate {
            Some(hz) => mode.with_frequency(hz),
            None => mode,
        }
    }
}

impl Default for VirtualDisplayOptions {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            frame_rate: None,
            display_name: Self::DEFAULT_NAME.to_string(),
        }
    }
}

/// Describes an active virtual display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualDisplayInfo {
    /// The controller's handle; always nonzero for an active display.
    pub id: VirtualDisplayHandle,
    /// Applied horizontal resolution in pixels.
    pub width: u32,
    /// Applied vertical resolution in pixels.
    pub height: u32,
    /// Label from the options, or the source device name for a clone.
    pub name: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
