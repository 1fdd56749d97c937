//! Configuration type definitions for esp32blocks.
//!
//! All types implement serde traits for JSON serialization and have sensible
//! defaults, so a partial config file fills in the rest.

use serde::{Deserialize, Serialize};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log output format, level and destination
    pub logging: LoggingConfig,
    /// The board the device adapter talks to
    pub device: DeviceConfig,
    /// Language of block and menu text
    pub locale: LocaleConfig,
}

// ============================================================================
// Logging Configuration
// ============================================================================

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable tracing output.
    Pretty,
    /// Compact `[LEVEL] target message {fields}` lines.
    #[default]
    Component,
    /// JSON lines.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Append logs to this file instead of stderr.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: "info".to_string(),
            file: None,
        }
    }
}

// ============================================================================
// Device Configuration
// ============================================================================

/// Board connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Id the host registered the board under.
    pub original_id: String,
    /// Serial port of the board, e.g. `/dev/ttyUSB0`.
    pub port: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            original_id: "microPythonEsp32".to_string(),
            port: None,
        }
    }
}

// ============================================================================
// Locale Configuration
// ============================================================================

/// Localisation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Locale code, e.g. `en` or `zh-cn`.
    pub language: String,
    /// JSON translation file (`{ locale: { key: text } }`).
    pub translations: Option<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            translations: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_config_defaults() {
        let cfg = DeviceConfig::default();
        assert_eq!(cfg.original_id, "microPythonEsp32");
        assert!(cfg.port.is_none());
    }

    #[test]
    fn test_locale_config_partial() {
        let cfg: LocaleConfig = serde_json::from_str(r#"{"language":"zh-cn"}"#).unwrap();
        assert_eq!(cfg.language, "zh-cn");
        assert!(cfg.translations.is_none());
    }

    #[test]
    fn test_log_format_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LogFormat::Component).unwrap(),
            "\"component\""
        );
    }
}
