//! The virtual display activity handle.
//!
//! This is not an OS resource handle.  A controller tracks at most one
//! virtual display, so the handle is either [`VirtualDisplayHandle::NONE`] or
//! the fixed sentinel [`VirtualDisplayHandle::ACTIVE`].

use serde::{Deserialize, Serialize};

/// Opaque identifier: `0` means no virtual display is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualDisplayHandle(pub u32);

impl VirtualDisplayHandle {
    /// No virtual display is active.
    pub const NONE: VirtualDisplayHandle = VirtualDisplayHandle(0);
    /// A virtual display is active.
    pub const ACTIVE: VirtualDisplayHandle = VirtualDisplayHandle(1);

    /// Returns `true` for any nonzero handle.
    pub fn is_active(&self) -> bool {
        self.0 != 0
    }

    /// The raw numeric value handed to callers.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VirtualDisplayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
