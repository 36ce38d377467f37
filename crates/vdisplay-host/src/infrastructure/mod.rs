//! Infrastructure layer.
//!
//! Contains the OS-facing adapters and file-system persistence.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `vdisplay_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.
//!
//! # Sub-modules
//!
//! - **`display_config`** – Implementations of `DisplayConfigService`.  The
//!   Win32 adapter is selected at compile time on Windows; other targets get
//!   an adapter that reports no devices and rejects every change.  A
//!   `MockDisplayService` is always compiled for tests.
//!
//! - **`storage`** – TOML configuration file holding the default display
//!   options and log level.

pub mod display_config;
pub mod storage;
