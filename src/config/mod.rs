//! Configuration management for esp32blocks.
//!
//! Configuration is loaded from `~/.esp32blocks/config.json` with environment
//! variable overrides of the form `ESP32BLOCKS_SECTION_KEY`.

mod types;
pub mod validate;

pub use types::*;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::i18n::{DefaultLocalizer, Localizer, TranslationTable};

impl Config {
    /// Returns the configuration directory path (~/.esp32blocks)
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".esp32blocks")
    }

    /// Returns the path to the config file (~/.esp32blocks/config.json)
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration from the default path with environment overrides.
    ///
    /// If the config file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::path())
    }

    /// Load configuration from a specific path with environment overrides.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self) {
        // Logging
        if let Ok(val) = std::env::var("ESP32BLOCKS_LOGGING_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("ESP32BLOCKS_LOGGING_FORMAT") {
            match val.to_ascii_lowercase().as_str() {
                "pretty" => self.logging.format = LogFormat::Pretty,
                "component" => self.logging.format = LogFormat::Component,
                "json" => self.logging.format = LogFormat::Json,
                // logging is not up yet; keep the file value
                _ => {}
            }
        }

        // Device
        if let Ok(val) = std::env::var("ESP32BLOCKS_DEVICE_PORT") {
            self.device.port = Some(val);
        }
        if let Ok(val) = std::env::var("ESP32BLOCKS_DEVICE_ORIGINAL_ID") {
            self.device.original_id = val;
        }

        // Locale
        if let Ok(val) = std::env::var("ESP32BLOCKS_LOCALE_LANGUAGE") {
            self.locale.language = val;
        }
        if let Ok(val) = std::env::var("ESP32BLOCKS_LOCALE_TRANSLATIONS") {
            self.locale.translations = Some(val);
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::path())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Localizer for the configured language.
    ///
    /// Without a translation file every message renders its default text.
    pub fn localizer(&self) -> Result<Box<dyn Localizer>> {
        match &self.locale.translations {
            Some(path) => Ok(Box::new(TranslationTable::load(
                &self.locale.language,
                &expand_home(path),
            )?)),
            None => Ok(Box::new(DefaultLocalizer)),
        }
    }
}

/// Expand ~ to home directory in a path string
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    } else if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }

    PathBuf::from(path)
}
