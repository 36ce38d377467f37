//! Domain entities for the virtual display controller.
//!
//! Pure data types with no OS dependencies.  They compile and test on any
//! platform; only the infrastructure layer in `vdisplay-host` turns them into
//! real display-settings calls.

/// Mode-change request flags and OS result codes.
pub mod change;

/// Enumerated display device records.
pub mod device;

/// The local "is a virtual display active" identifier.
pub mod handle;

/// Display mode descriptor (resolution, depth, frequency).
pub mod mode;

/// Caller-facing creation options and result info.
pub mod options;
