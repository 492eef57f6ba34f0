// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[overlay]` - Exit animation delays and the sheet enter handshake
//! - `[form]` - Simulated inquiry submission timings
//! - `[toast]` - Notification duration and stacking
//! - `[contact]` - Whether the contact channel is live and where booking links to
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `SUNSHINE_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use sunshine_gallery::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.contact.live = Some(true);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::state::TransitionDelay;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned by [`load`] when an existing file cannot be used.
pub const LOAD_WARNING: &str = "Settings file could not be read, defaults are in use.";

// =============================================================================
// Section Structs
// =============================================================================

/// Overlay transition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    /// Exit animation delay for the About and Contact panels.
    #[serde(
        default = "default_panel_close_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub panel_close_ms: Option<u64>,

    /// Exit animation delay for the Booking sheet.
    #[serde(
        default = "default_sheet_close_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub sheet_close_ms: Option<u64>,

    /// Whether the sheet waits one frame in `Opening` before settling in `Open`.
    #[serde(
        default = "default_sheet_enter_handshake",
        skip_serializing_if = "Option::is_none"
    )]
    pub sheet_enter_handshake: Option<bool>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            panel_close_ms: default_panel_close_ms(),
            sheet_close_ms: default_sheet_close_ms(),
            sheet_enter_handshake: default_sheet_enter_handshake(),
        }
    }
}

/// Inquiry form simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormConfig {
    /// Simulated round-trip before the submission settles.
    #[serde(
        default = "default_submit_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub submit_delay_ms: Option<u64>,

    /// Delay before the Contact panel form resets after success.
    #[serde(
        default = "default_panel_reset_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub panel_reset_ms: Option<u64>,

    /// Delay before the Booking sheet form resets and closes the sheet.
    #[serde(
        default = "default_sheet_reset_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub sheet_reset_ms: Option<u64>,

    /// Make every simulated submission fail (exercises the error toast).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulate_failure: Option<bool>,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
            panel_reset_ms: default_panel_reset_ms(),
            sheet_reset_ms: default_sheet_reset_ms(),
            simulate_failure: Some(false),
        }
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToastConfig {
    /// How long each toast stays visible.
    #[serde(
        default = "default_toast_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_ms: Option<u64>,

    /// Maximum toasts on screen; the rest wait in a queue.
    #[serde(
        default = "default_toast_max_visible",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_visible: Option<usize>,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
            max_visible: default_toast_max_visible(),
        }
    }
}

/// Contact channel settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContactConfig {
    /// Whether inquiries go to a real inbox. Only changes wording here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,

    /// External booking page, offered once the channel is live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub form: FormConfig,

    #[serde(default)]
    pub toast: ToastConfig,

    #[serde(default)]
    pub contact: ContactConfig,
}

impl Config {
    /// Exit delay for slide-in panels, clamped.
    #[must_use]
    pub fn panel_close_delay(&self) -> TransitionDelay {
        TransitionDelay::new(
            self.overlay
                .panel_close_ms
                .unwrap_or(DEFAULT_PANEL_CLOSE_MS),
        )
    }

    /// Exit delay for the bottom sheet, clamped.
    #[must_use]
    pub fn sheet_close_delay(&self) -> TransitionDelay {
        TransitionDelay::new(
            self.overlay
                .sheet_close_ms
                .unwrap_or(DEFAULT_SHEET_CLOSE_MS),
        )
    }

    #[must_use]
    pub fn sheet_enter_handshake(&self) -> bool {
        self.overlay.sheet_enter_handshake.unwrap_or(true)
    }

    #[must_use]
    pub fn submit_delay(&self) -> TransitionDelay {
        TransitionDelay::new(self.form.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }

    #[must_use]
    pub fn panel_reset_delay(&self) -> TransitionDelay {
        TransitionDelay::new(self.form.panel_reset_ms.unwrap_or(DEFAULT_PANEL_RESET_MS))
    }

    #[must_use]
    pub fn sheet_reset_delay(&self) -> TransitionDelay {
        TransitionDelay::new(self.form.sheet_reset_ms.unwrap_or(DEFAULT_SHEET_RESET_MS))
    }

    #[must_use]
    pub fn simulate_failure(&self) -> bool {
        self.form.simulate_failure.unwrap_or(false)
    }

    /// Toast display duration, clamped to the supported range.
    #[must_use]
    pub fn toast_duration(&self) -> Duration {
        let millis = self
            .toast
            .duration_ms
            .unwrap_or(DEFAULT_TOAST_DURATION_MS)
            .clamp(MIN_TOAST_DURATION_MS, MAX_TOAST_DURATION_MS);
        Duration::from_millis(millis)
    }

    #[must_use]
    pub fn toast_max_visible(&self) -> usize {
        self.toast
            .max_visible
            .unwrap_or(DEFAULT_TOAST_MAX_VISIBLE)
            .clamp(1, MAX_TOAST_MAX_VISIBLE)
    }

    #[must_use]
    pub fn contact_live(&self) -> bool {
        self.contact.live.unwrap_or(false)
    }

    #[must_use]
    pub fn booking_url(&self) -> &str {
        self.contact
            .booking_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BOOKING_URL)
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_panel_close_ms() -> Option<u64> {
    Some(DEFAULT_PANEL_CLOSE_MS)
}

fn default_sheet_close_ms() -> Option<u64> {
    Some(DEFAULT_SHEET_CLOSE_MS)
}

fn default_sheet_enter_handshake() -> Option<bool> {
    Some(true)
}

fn default_submit_delay_ms() -> Option<u64> {
    Some(DEFAULT_SUBMIT_DELAY_MS)
}

fn default_panel_reset_ms() -> Option<u64> {
    Some(DEFAULT_PANEL_RESET_MS)
}

fn default_sheet_reset_ms() -> Option<u64> {
    Some(DEFAULT_SHEET_RESET_MS)
}

fn default_toast_duration_ms() -> Option<u64> {
    Some(DEFAULT_TOAST_DURATION_MS)
}

fn default_toast_max_visible() -> Option<usize> {
    Some(DEFAULT_TOAST_MAX_VISIBLE)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default settings");
                    return (Config::default(), Some(LOAD_WARNING.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
