//! Mode-change request flags and result codes.
//!
//! # How a mode change is requested (for beginners)
//!
//! Every lifecycle operation ends in one "apply mode change" call to the OS.
//! The call takes an optional target mode and a set of [`ChangeFlags`]:
//!
//! - With a mode and `UPDATE_REGISTRY | NO_RESET`, the OS stores the mode as
//!   the persisted configuration without forcing an immediate full reset and
//!   without prompting the user.
//! - With no mode and no flags, the OS reverts to whatever configuration is
//!   persisted in the registry.
//!
//! The OS answers with a signed status code, modelled as [`ModeChangeStatus`].
//! Only [`ModeChangeStatus::Successful`] counts as success; every other code,
//! including "restart required", is reported to the caller as a failure.

use serde::{Deserialize, Serialize};

/// Flags governing persistence and reset behaviour of a mode change.
///
/// Bit values match the Win32 `CDS_*` constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeFlags(pub u32);

impl ChangeFlags {
    pub const UPDATE_REGISTRY_BIT: u32 = 0x0000_0001;
    pub const NO_RESET_BIT: u32 = 0x1000_0000;

    /// No flags: a dynamic change, or a revert when no mode is given.
    pub const NONE: ChangeFlags = ChangeFlags(0);

    /// Persist the mode in the registry without an immediate reset.
    pub const PERSIST_NO_RESET: ChangeFlags =
        ChangeFlags(Self::UPDATE_REGISTRY_BIT | Self::NO_RESET_BIT);

    /// Returns `true` if every bit of `mask` is set.
    pub fn contains(&self, mask: u32) -> bool {
        self.0 & mask == mask
    }
}

/// Result of a mode-change request as reported by the OS.
///
/// Codes match the Win32 `DISP_CHANGE_*` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeChangeStatus {
    Successful,
    Restart,
    Failed,
    BadMode,
    NotUpdated,
    BadFlags,
    BadParam,
    BadDualView,
    /// A code this crate does not know about.
    Unknown(i32),
}

impl ModeChangeStatus {
    /// Maps a raw OS status code to a [`ModeChangeStatus`].
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Successful,
            1 => Self::Restart,
            -1 => Self::Failed,
            -2 => Self::BadMode,
            -3 => Self::NotUpdated,
            -4 => Self::BadFlags,
            -5 => Self::BadParam,
            -6 => Self::BadDualView,
            other => Self::Unknown(other),
        }
    }

    /// The raw OS status code.
    pub fn code(&self) -> i32 {
        match self {
            Self::Successful => 0,
            Self::Restart => 1,
            Self::Failed => -1,
            Self::BadMode => -2,
            Self::NotUpdated => -3,
            Self::BadFlags => -4,
            Self::BadParam => -5,
            Self::BadDualView => -6,
            Self::Unknown(code) => *code,
        }
    }

    /// Returns `true` only for [`ModeChangeStatus::Successful`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Successful)
    }

    /// Human-readable description of the status.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Successful => "the settings change was successful",
            Self::Restart => "the computer must be restarted for the graphics mode to work",
            Self::Failed => "the display driver failed the specified graphics mode",
            Self::BadMode => "the graphics mode is not supported",
            Self::NotUpdated => "unable to write settings to the registry",
            Self::BadFlags => "an invalid set of flags was passed in",
            Self::BadParam => "an invalid parameter was passed in",
            Self::BadDualView => "the system is DualView capable",
            Self::Unknown(_) => "unrecognised display change status",
        }
    }
}

impl std::fmt::Display for ModeChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (status {})", self.description(), self.code())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
