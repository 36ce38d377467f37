//! Application layer use cases.
//!
//! - **`display_controller`** – The virtual display lifecycle state machine
//!   (`create`, `clone`, `destroy`) and the [`DisplayConfigService`] port it
//!   drives.  The OS adapter is injected at construction time.
//!
//! - **`list_devices`** – Enumerates every display device with its current
//!   mode, for the `devices` command.
//!
//! - **`diagnose`** – Creates a test display, reports the outcome, and
//!   destroys it again.
//!
//! [`DisplayConfigService`]: display_controller::DisplayConfigService

pub mod diagnose;
pub mod display_controller;
pub mod list_devices;
