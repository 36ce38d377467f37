//! Platform display-configuration adapters.
//!
//! Each platform implements [`DisplayConfigService`]; the correct one is
//! selected at compile time via `#[cfg(target_os = ...)]` and re-exported as
//! `NativeDisplayService`:
//!
//! | Module        | OS          | API used                                          |
//! |---------------|-------------|---------------------------------------------------|
//! | `windows`     | Windows     | `EnumDisplayDevicesW`, `EnumDisplaySettingsW`, `ChangeDisplaySettingsW` |
//! | `unsupported` | all others  | none; no devices, every change fails              |
//!
//! A [`mock::MockDisplayService`] is always compiled (not guarded by
//! `#[cfg]`) so tests on any platform can drive the controller without
//! changing the test machine's display settings.
//!
//! [`DisplayConfigService`]: crate::application::display_controller::DisplayConfigService

pub mod mock;

// ── Windows implementation ────────────────────────────────────────────────────

#[cfg(target_os = "windows")]
pub mod windows;

/// Re-export the Win32 adapter as `NativeDisplayService` on Windows.
#[cfg(target_os = "windows")]
pub use self::windows::WindowsDisplayService as NativeDisplayService;

// ── Fallback for every other target ───────────────────────────────────────────

#[cfg(not(target_os = "windows"))]
pub mod unsupported;

/// Re-export the fallback adapter as `NativeDisplayService` elsewhere.
#[cfg(not(target_os = "windows"))]
pub use self::unsupported::UnsupportedDisplayService as NativeDisplayService;
