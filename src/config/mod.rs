// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, loaded from a
//! `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[gallery]` - Asset host, folder discovery, and the intake form link
//! - `[overlay]` - Detail overlay animation
//! - `[loader]` - Loader concurrency and request timeout
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `ICED_GALLERY_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_gallery::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Point the gallery at a web host
//! config.gallery.source = Some("https://gallery.example".to_string());
//!
//! // Write it somewhere explicit, e.g. for a portable install
//! config::save_to_path(&config, std::path::Path::new("portable/settings.toml"))
//!     .expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Notification key reported when the config file exists but cannot be read.
pub const LOAD_ERROR_KEY: &str = "notification-config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Where submissions come from and how they are discovered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GalleryConfig {
    /// Asset host: an `http(s)://` base URL or a local directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Directory below the host root holding the numbered folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Explicit folder names to probe. Empty means `001..=scan_limit`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scan_limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_additional_images: Option<usize>,

    /// Intake form opened by the "Submit" link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submit_url: Option<String>,
}

impl GalleryConfig {
    #[must_use]
    pub fn source(&self) -> &str {
        non_blank(self.source.as_deref()).unwrap_or(DEFAULT_SOURCE)
    }

    /// An empty string is a valid root and maps folders onto the host root.
    #[must_use]
    pub fn root(&self) -> &str {
        self.root.as_deref().unwrap_or(DEFAULT_SUBMISSIONS_ROOT)
    }

    #[must_use]
    pub fn scan_limit(&self) -> u32 {
        self.scan_limit
            .unwrap_or(DEFAULT_SCAN_LIMIT)
            .min(MAX_SCAN_LIMIT)
    }

    #[must_use]
    pub fn max_additional_images(&self) -> usize {
        self.max_additional_images
            .unwrap_or(DEFAULT_MAX_ADDITIONAL_IMAGES)
            .min(MAX_ADDITIONAL_IMAGES)
    }

    #[must_use]
    pub fn submit_url(&self) -> &str {
        non_blank(self.submit_url.as_deref()).unwrap_or(DEFAULT_SUBMIT_URL)
    }
}

/// Detail overlay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlayConfig {
    /// Slide in/out duration in milliseconds.
    #[serde(
        default = "default_transition_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_ms: Option<u64>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            transition_ms: default_transition_ms(),
        }
    }
}

impl OverlayConfig {
    #[must_use]
    pub fn transition(&self) -> Duration {
        let ms = self
            .transition_ms
            .unwrap_or(DEFAULT_TRANSITION_MS)
            .clamp(MIN_TRANSITION_MS, MAX_TRANSITION_MS);
        Duration::from_millis(ms)
    }
}

/// Loader settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoaderConfig {
    /// Folders loaded at the same time; 1 loads them one by one.
    #[serde(
        default = "default_max_concurrent_folders",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_concurrent_folders: Option<usize>,

    /// Per-request timeout for HTTP hosts. Unset keeps the transport default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_concurrent_folders: default_max_concurrent_folders(),
            request_timeout_secs: None,
        }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn max_concurrent_folders(&self) -> usize {
        self.max_concurrent_folders
            .unwrap_or(DEFAULT_MAX_CONCURRENT_FOLDERS)
            .clamp(MIN_CONCURRENT_FOLDERS, MAX_CONCURRENT_FOLDERS)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub loader: LoaderConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::Light
}

fn default_transition_ms() -> Option<u64> {
    Some(DEFAULT_TRANSITION_MS)
}

fn default_max_concurrent_folders() -> Option<usize> {
    Some(DEFAULT_MAX_CONCURRENT_FOLDERS)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
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
/// default config with a notification key explaining what went wrong.
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
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some(LOAD_ERROR_KEY.to_string()));
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Dark,
            },
            gallery: GalleryConfig {
                source: Some("https://gallery.example".to_string()),
                root: Some("works".to_string()),
                folders: vec!["010".to_string(), "011".to_string()],
                scan_limit: Some(40),
                max_additional_images: Some(3),
                submit_url: Some("https://forms.example/submit".to_string()),
            },
            overlay: OverlayConfig {
                transition_ms: Some(250),
            },
            loader: LoaderConfig {
                max_concurrent_folders: Some(2),
                request_timeout_secs: Some(15),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "this is not valid toml = [").expect("write");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.general.language, None);
        assert_eq!(config.general.theme_mode, ThemeMode::Light);
        assert_eq!(config.gallery.source(), DEFAULT_SOURCE);
        assert_eq!(config.gallery.root(), DEFAULT_SUBMISSIONS_ROOT);
        assert!(config.gallery.folders.is_empty());
        assert_eq!(config.gallery.scan_limit(), DEFAULT_SCAN_LIMIT);
        assert_eq!(config.gallery.submit_url(), DEFAULT_SUBMIT_URL);
        assert_eq!(
            config.overlay.transition(),
            Duration::from_millis(DEFAULT_TRANSITION_MS)
        );
        assert_eq!(
            config.loader.max_concurrent_folders(),
            DEFAULT_MAX_CONCURRENT_FOLDERS
        );
        assert_eq!(config.loader.request_timeout(), None);
    }

    #[test]
    fn partial_file_fills_missing_sections_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            [gallery]
            source = "https://gallery.example"
            "#,
        )
        .expect("parse");

        assert_eq!(config.gallery.source(), "https://gallery.example");
        assert_eq!(config.overlay.transition_ms, Some(DEFAULT_TRANSITION_MS));
        assert_eq!(config.general.theme_mode, ThemeMode::Light);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config: Config = toml::from_str(
            r#"
            [gallery]
            scan_limit = 100000
            max_additional_images = 1000

            [overlay]
            transition_ms = 999999

            [loader]
            max_concurrent_folders = 0
            request_timeout_secs = 0
            "#,
        )
        .expect("parse");

        assert_eq!(config.gallery.scan_limit(), MAX_SCAN_LIMIT);
        assert_eq!(config.gallery.max_additional_images(), MAX_ADDITIONAL_IMAGES);
        assert_eq!(
            config.overlay.transition(),
            Duration::from_millis(MAX_TRANSITION_MS)
        );
        assert_eq!(config.loader.max_concurrent_folders(), MIN_CONCURRENT_FOLDERS);
        assert_eq!(config.loader.request_timeout(), None);
    }

    #[test]
    fn blank_source_and_submit_url_fall_back() {
        let gallery = GalleryConfig {
            source: Some("   ".to_string()),
            submit_url: Some(String::new()),
            ..GalleryConfig::default()
        };
        assert_eq!(gallery.source(), DEFAULT_SOURCE);
        assert_eq!(gallery.submit_url(), DEFAULT_SUBMIT_URL);
    }

    #[test]
    fn empty_root_is_kept() {
        let gallery = GalleryConfig {
            root: Some(String::new()),
            ..GalleryConfig::default()
        };
        assert_eq!(gallery.root(), "");
    }

    #[test]
    fn theme_mode_is_case_insensitive() {
        let config: Config = toml::from_str(
            r#"
            [general]
            theme_mode = "DARK"
            "#,
        )
        .expect("parse");
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn unknown_theme_mode_is_an_error() {
        let result = toml::from_str::<Config>(
            r#"
            [general]
            theme_mode = "sepia"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[[[ not toml").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some(LOAD_ERROR_KEY));
    }

    #[test]
    fn load_with_override_reads_settings_file_in_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base = temp_dir.path().join("cfg");
        let mut config = Config::default();
        config.gallery.folders = vec!["003".to_string()];

        save_to_path(&config, &base.join(CONFIG_FILE)).expect("save");
        let (loaded, warning) = load_with_override(Some(base));

        assert!(warning.is_none());
        assert_eq!(loaded.gallery.folders, vec!["003".to_string()]);
    }

    #[test]
    fn saved_config_uses_sectioned_format() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        save_to_path(&Config::default(), &path).expect("save");

        let content = fs::read_to_string(&path).expect("read");
        assert!(content.contains("[general]"));
        assert!(content.contains("[overlay]"));
        assert!(content.contains("transition_ms = 600"));
    }
}
