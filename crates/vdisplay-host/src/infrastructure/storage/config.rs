//! TOML-based configuration for the virtual display host.
//!
//! Reads and writes `AppConfig` to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\VirtualDisplay\config.toml`
//! - Linux:    `~/.config/vdisplay/config.toml`
//! - macOS:    `~/Library/Application Support/VirtualDisplay/config.toml`
//!
//! [`resolve_config_path`] prefers an explicit path (the `--config` flag or
//! `VDISPLAY_CONFIG`) over the platform location.
//!
//! Example file:
//!
//! ```toml
//! [display]
//! width = 1920
//! height = 1080
//! frame_rate = 60
//! name = "Streaming Surface"
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "some_fn")]` and every section
//! `#[serde(default)]`, so a missing file, an empty file, or a file from an
//! older version all load to a usable configuration.  Controller state is
//! never persisted here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vdisplay_core::VirtualDisplayOptions;

/// File name of the config inside the platform directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(any(target_os = "windows", target_os = "macos"))]
const APP_DIR_NAME: &str = "VirtualDisplay";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
const APP_DIR_NAME: &str = "vdisplay";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No explicit path was given and the platform base directory is unknown.
    #[error("no config path given and no platform config directory (set VDISPLAY_CONFIG)")]
    NoPlatformConfigDir,

    /// Reading or writing the config file failed.
    #[error("cannot access config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default parameters for the `create` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Horizontal resolution in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Vertical resolution in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Refresh rate in Hz; omitted means "leave it to the driver".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<u32>,
    /// Label reported for the created display.
    #[serde(default = "default_name")]
    pub name: String,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl DisplayConfig {
    /// Converts the configured defaults into controller options.
    pub fn to_options(&self) -> VirtualDisplayOptions {
        VirtualDisplayOptions {
            width: self.width,
            height: self.height,
            frame_rate: self.frame_rate,
            display_name: self.name.clone(),
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_width() -> u32 {
    VirtualDisplayOptions::DEFAULT_WIDTH
}
fn default_height() -> u32 {
    VirtualDisplayOptions::DEFAULT_HEIGHT
}
fn default_name() -> String {
    VirtualDisplayOptions::DEFAULT_NAME.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            frame_rate: None,
            name: default_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Picks the config file to use: `explicit` when given, otherwise
/// `config.toml` in the platform directory.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when `explicit` is `None` and
/// the platform base directory cannot be derived from the environment.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let base = platform_config_base().ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(config_path_under(&base))
}

/// `<base>/<app dir>/config.toml`.
fn config_path_under(base: &Path) -> PathBuf {
    base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Per-user configuration base directory, before the app subdirectory.
fn platform_config_base() -> Option<PathBuf> {
    let home = || std::env::var_os("HOME").map(PathBuf::from);

    if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else if cfg!(target_os = "macos") {
        home().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(unix) {
        std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| home().map(|h| h.join(".config")))
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
