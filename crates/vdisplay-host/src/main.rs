//! Virtual display host — command-line entry point.
//!
//! Exposes the controller's operations as subcommands and prints each result
//! as JSON on stdout.  Errors go through `anyhow` and end the process with a
//! non-zero exit code.
//!
//! # Usage
//!
//! ```text
//! vdisplay-host [--config <PATH>] <COMMAND>
//!
//! Commands:
//!   create       Apply a virtual display mode (defaults from config)
//!   clone        Apply the primary display's current mode
//!   destroy      Revert to the persisted display configuration
//!   devices      List display devices and their current modes
//!   diagnose     Create a test display and destroy it again
//!   init-config  Write the effective configuration to the config file
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable          | Description                                  |
//! |-------------------|----------------------------------------------|
//! | `VDISPLAY_CONFIG` | Config file path (instead of the platform one) |
//! | `RUST_LOG`        | Log filter; overrides `[logging] level`      |
//!
//! Each invocation runs a fresh controller, so `destroy` in a later process
//! still reverts the OS configuration; it simply starts from handle `0`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vdisplay_host::application::diagnose::run_diagnostic;
use vdisplay_host::application::display_controller::{DisplayConfigService, DisplayController};
use vdisplay_host::application::list_devices::list_devices;
use vdisplay_host::infrastructure::display_config::NativeDisplayService;
use vdisplay_host::infrastructure::storage::config::{
    load_config_from, resolve_config_path, save_config_to, AppConfig, DisplayConfig,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Creates, clones, and destroys a virtual display mode.
#[derive(Debug, Parser)]
#[command(name = "vdisplay-host", version)]
struct Cli {
    /// Path to the TOML config file.  Defaults to the platform config dir.
    #[arg(long, global = true, env = "VDISPLAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply a virtual display mode.
    Create(CreateArgs),
    /// Apply the primary display's current mode.
    Clone(CloneArgs),
    /// Revert to the persisted display configuration.
    Destroy,
    /// List display devices and their current modes.
    Devices,
    /// Create a 1920x1080@60 test display and destroy it again.
    Diagnose,
    /// Write the effective configuration to the config file.
    InitConfig,
}

/// Overrides for the `[display]` config section.
#[derive(Debug, Args)]
struct CreateArgs {
    /// Horizontal resolution in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Vertical resolution in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Refresh rate in Hz.
    #[arg(long)]
    frame_rate: Option<u32>,

    /// Label reported for the created display.
    #[arg(long)]
    name: Option<String>,

    /// Keep the display for this many seconds, then destroy it.
    #[arg(long)]
    hold_secs: Option<u64>,
}

/// Overrides for the `clone` command.
#[derive(Debug, Args)]
struct CloneArgs {
    /// Label reported for the cloned display (default: `[display] name`).
    #[arg(long)]
    name: Option<String>,
}

impl CreateArgs {
    /// Applies the command-line overrides on top of the configured defaults.
    fn merge_into(&self, mut display: DisplayConfig) -> DisplayConfig {
        if let Some(width) = self.width {
            display.width = width;
        }
        if let Some(height) = self.height {
            display.height = height;
        }
        if self.frame_rate.is_some() {
            display.frame_rate = self.frame_rate;
        }
        if let Some(name) = &self.name {
            display.name = name.clone();
        }
        display
    }
}

/// JSON shape printed by `destroy`.
#[derive(Debug, Serialize)]
struct HandleOutput {
    handle: u32,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path =
        resolve_config_path(cli.config.as_deref()).context("locating config file")?;
    let config = load_config_from(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // `RUST_LOG` wins; otherwise the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let service: Arc<dyn DisplayConfigService> = Arc::new(NativeDisplayService::new());
    run(cli.command, &config, &config_path, service)
}

fn run(
    command: Command,
    config: &AppConfig,
    config_path: &std::path::Path,
    service: Arc<dyn DisplayConfigService>,
) -> anyhow::Result<()> {
    match command {
        Command::Create(args) => {
            let options = args.merge_into(config.display.clone()).to_options();
            let mut controller = DisplayController::new(service);
            let display = controller
                .create_with_options(&options)
                .context("create")?;
            print_json(&display)?;

            if let Some(secs) = args.hold_secs {
                info!(secs, "holding virtual display");
                std::thread::sleep(Duration::from_secs(secs));
                let handle = controller.destroy().context("destroy after hold")?;
                print_json(&HandleOutput {
                    handle: handle.value(),
                })?;
            }
        }
        Command::Clone(args) => {
            let name = args.name.as_deref().unwrap_or(&config.display.name);
            let mut controller = DisplayController::new(service);
            let display = controller.clone_with_name(name).context("clone")?;
            print_json(&display)?;
        }
        Command::Destroy => {
            let mut controller = DisplayController::new(service);
            let handle = controller.destroy().context("destroy")?;
            print_json(&HandleOutput {
                handle: handle.value(),
            })?;
        }
        Command::Devices => {
            print_json(&list_devices(service.as_ref()))?;
        }
        Command::Diagnose => {
            let report = run_diagnostic(service);
            print_json(&report)?;
            if !report.passed() {
                anyhow::bail!("diagnostic did not complete");
            }
        }
        Command::InitConfig => {
            save_config_to(config, config_path)
                .with_context(|| format!("writing config to {}", config_path.display()))?;
            info!(path = %config_path.display(), "config written");
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
