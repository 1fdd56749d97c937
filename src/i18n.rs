//! Localisation of block and menu text.
//!
//! Every user-visible string in the catalog is a [`Message`]: a translation key,
//! the English default and a note for translators. A [`Localizer`] turns a
//! message into display text. [`DefaultLocalizer`] always returns the default;
//! [`TranslationTable`] loads per-locale overrides from a JSON file of the form
//!
//! ```json
//! { "zh-cn": { "microPythonEsp32.category.pins": "引脚" } }
//! ```

use std::collections::HashMap;
use std::path::Path;

use crate::error::{BlocksError, Result};

/// A translatable string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    /// Translation key, e.g. `microPythonEsp32.pins.esp32InitPinMode`.
    pub id: &'static str,
    /// English text used when no translation exists.
    pub default: &'static str,
    /// Context for translators.
    pub description: &'static str,
}

impl Message {
    pub const fn new(id: &'static str, default: &'static str, description: &'static str) -> Self {
        Self {
            id,
            default,
            description,
        }
    }
}

/// Resolves messages into display text.
pub trait Localizer: Send + Sync {
    fn format(&self, message: &Message) -> String;
}

/// Returns every message's default text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocalizer;

impl Localizer for DefaultLocalizer {
    fn format(&self, message: &Message) -> String {
        message.default.to_string()
    }
}

/// Translations for a single locale, falling back to defaults for missing keys.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    locale: String,
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Build a table directly from key/text pairs.
    pub fn new(locale: impl Into<String>, entries: HashMap<String, String>) -> Self {
        Self {
            locale: locale.into(),
            entries,
        }
    }

    /// Pick `locale` out of a `{ locale: { key: text } }` JSON document.
    ///
    /// A locale missing from the document yields an empty table.
    pub fn from_json(locale: &str, json: &str) -> Result<Self> {
        let mut all: HashMap<String, HashMap<String, String>> = serde_json::from_str(json)?;
        let entries = all.remove(locale).unwrap_or_default();
        Ok(Self::new(locale, entries))
    }

    /// Load a translation file from disk.
    pub fn load(locale: &str, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BlocksError::Config(format!(
                "Failed to read translations {}: {}",
                path.display(),
                e
            ))
        })?;
        let table = Self::from_json(locale, &content)?;
        tracing::debug!(
            locale = locale,
            entries = table.len(),
            "Loaded translation table"
        );
        Ok(table)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for TranslationTable {
    fn format(&self, message: &Message) -> String {
        self.entries
            .get(message.id)
            .cloned()
            .unwrap_or_else(|| message.default.to_string())
    }
}
