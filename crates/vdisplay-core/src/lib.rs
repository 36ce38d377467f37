//! # vdisplay-core
//!
//! Shared domain types for the virtual display controller: display mode
//! descriptors, enumerated device descriptors, the activity handle, the
//! mode-change request flags and status codes, and the caller-facing
//! creation options.
//!
//! This crate has zero dependencies on OS APIs.  The bit values used by
//! [`ModeFields`], [`DeviceStateFlags`], and [`ChangeFlags`], and the status
//! codes in [`ModeChangeStatus`], match the Win32 display-settings API so the
//! platform adapter can pass them through without translation tables.
//!
//! # Architecture overview (for beginners)
//!
//! A virtual display here is not a new piece of hardware.  It is a display
//! *mode* (resolution, colour depth, optionally refresh rate) that the
//! controller asks the operating system to apply, and later asks it to
//! revert.  The controller lives in the `vdisplay-host` crate; this crate only
//! defines the records it stages before each OS call:
//!
//! - **`domain::mode`** – what mode to apply ([`DisplayModeDescriptor`]).
//! - **`domain::device`** – which physical device a mode was read from
//!   ([`DeviceDescriptor`]).
//! - **`domain::change`** – how to apply it ([`ChangeFlags`]) and what the OS
//!   answered ([`ModeChangeStatus`]).
//! - **`domain::handle`** – whether a virtual display is active
//!   ([`VirtualDisplayHandle`]).
//! - **`domain::options`** – caller-supplied creation parameters
//!   ([`VirtualDisplayOptions`]) and the result record ([`VirtualDisplayInfo`]).

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `vdisplay_core::DisplayModeDescriptor` instead of the full module path.
pub use domain::change::{ChangeFlags, ModeChangeStatus};
pub use domain::device::{DeviceDescriptor, DeviceStateFlags};
pub use domain::handle::VirtualDisplayHandle;
pub use domain::mode::{DisplayModeDescriptor, ModeFields};
pub use domain::options::{OptionsError, VirtualDisplayInfo, VirtualDisplayOptions};
