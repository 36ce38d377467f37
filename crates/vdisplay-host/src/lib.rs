//! vdisplay-host library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does vdisplay-host do? (for beginners)
//!
//! It owns a [`application::display_controller::DisplayController`]: a small
//! state machine with three operations.
//!
//! 1. **create** applies a fixed 1280×720, 32-bit mode (or one built from
//!    caller options) as the persisted display configuration.
//! 2. **clone** finds the primary display device, reads its current mode, and
//!    applies that mode the same way.
//! 3. **destroy** asks the OS to revert to its persisted configuration.
//!
//! The controller never calls the OS directly.  It talks to a
//! `DisplayConfigService` that is injected at construction time: the Win32
//! adapter on Windows, or the in-memory mock in tests.

/// Application layer: the controller and diagnostic use cases.
pub mod application;

/// Infrastructure layer: OS display adapters and config storage.
pub mod infrastructure;
