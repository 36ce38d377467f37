//! Display mode descriptor.
//!
//! A [`DisplayModeDescriptor`] is the staging buffer the controller fills in
//! before every mode-change request.  Only the fields whose bit is present in
//! [`DisplayModeDescriptor::fields`] are meaningful to the OS; the rest are
//! ignored even when non-zero.

use serde::{Deserialize, Serialize};

/// Bitmask naming which fields of a [`DisplayModeDescriptor`] are set.
///
/// Bit values match the Win32 `DM_*` constants of `DEVMODEW::dmFields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeFields(pub u32);

impl ModeFields {
    pub const BITS_PER_PEL: u32 = 0x0004_0000;
    pub const PELS_WIDTH: u32 = 0x0008_0000;
    pub const PELS_HEIGHT: u32 = 0x0010_0000;
    pub const DISPLAY_FREQUENCY: u32 = 0x0040_0000;

    /// No field is meaningful.
    pub const NONE: ModeFields = ModeFields(0);

    /// Width, height, and colour depth are meaningful.
    pub const RESOLUTION_AND_DEPTH: ModeFields =
        ModeFields(Self::PELS_WIDTH | Self::PELS_HEIGHT | Self::BITS_PER_PEL);

    /// Returns `true` if every bit of `mask` is set.
    pub fn contains(&self, mask: u32) -> bool {
        self.0 & mask == mask
    }

    /// Returns a copy with the bits of `mask` added.
    pub fn with(self, mask: u32) -> Self {
        ModeFields(self.0 | mask)
    }
}

/// Width, height, colour depth, and optional refresh rate of a display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayModeDescriptor {
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// Colour depth in bits per pixel.
    pub bits_per_pixel: u32,
    /// Refresh rate in Hz.  Only meaningful with [`ModeFields::DISPLAY_FREQUENCY`].
    pub frequency: u32,
    /// Which of the above fields the OS should honour.
    pub fields: ModeFields,
}

impl DisplayModeDescriptor {
    /// Colour depth used for every mode the controller creates itself.
    pub const DEFAULT_BITS_PER_PIXEL: u32 = 32;

    /// The all-zero descriptor a controller starts with.
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Builds a descriptor with width, height, and depth marked meaningful.
    pub fn with_resolution(width: u32, height: u32, bits_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            bits_per_pixel,
            frequency: 0,
            fields: ModeFields::RESOLUTION_AND_DEPTH,
        }
    }

    /// Returns a copy that also requests the given refresh rate.
    pub fn with_frequency(mut self, hz: u32) -> Self {
        self.frequency = hz;
        self.fields = self.fields.with(ModeFields::DISPLAY_FREQUENCY);
        self
    }

    /// Returns the refresh rate if its field bit is set.
    pub fn requested_frequency(&self) -> Option<u32> {
        self.fields
            .contains(ModeFields::DISPLAY_FREQUENCY)
            .then_some(self.frequency)
    }
}

impl std::fmt::Display for DisplayModeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.bits_per_pixel)?;
        if let Some(hz) = self.requested_frequency() {
            write!(f, "@{hz}Hz")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
