//! Configuration validation with unknown field detection.

use serde_json::Value;

use crate::peripherals::validate_serial_path;

/// Known top-level config field names.
const KNOWN_TOP_LEVEL: &[&str] = &["logging", "device", "locale"];

/// Known fields for each section.
const KNOWN_LOGGING: &[&str] = &["format", "level", "file"];
const KNOWN_DEVICE: &[&str] = &["original_id", "port"];
const KNOWN_LOCALE: &[&str] = &["language", "translations"];

const LOG_FORMATS: &[&str] = &["pretty", "component", "json"];

/// A validation diagnostic.
#[derive(Debug)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub path: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum DiagnosticLevel {
    Ok,
    Warn,
    Error,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            DiagnosticLevel::Ok => "[OK]",
            DiagnosticLevel::Warn => "[WARN]",
            DiagnosticLevel::Error => "[ERROR]",
        };
        if self.path.is_empty() {
            write!(f, "{} {}", prefix, self.message)
        } else {
            write!(f, "{} {}: {}", prefix, self.path, self.message)
        }
    }
}

/// Simple Levenshtein distance for "did you mean?" suggestions.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        prev = row;
    }
    prev[b.len()]
}

/// Suggest the closest known field name (if distance <= 3).
pub fn suggest_field(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (k, levenshtein(unknown, k)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(k, _)| format!("did you mean '{}'?", k))
}

fn check_keys(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    known: &[&str],
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let mut has_unknown = false;
    for key in obj.keys() {
        if known.contains(&key.as_str()) {
            continue;
        }
        has_unknown = true;
        let msg = match suggest_field(key, known) {
            Some(suggestion) => format!("Unknown field '{}', {}", key, suggestion),
            None => format!("Unknown field '{}'", key),
        };
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        diagnostics.push(Diagnostic::new(DiagnosticLevel::Error, path, msg));
    }
    has_unknown
}

/// Validate a raw JSON config value against known field names and values.
pub fn validate_config(raw: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let obj = match raw.as_object() {
        Some(o) => o,
        None => {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Error,
                "",
                "Config must be a JSON object",
            ));
            return diagnostics;
        }
    };

    diagnostics.push(Diagnostic::new(DiagnosticLevel::Ok, "", "Valid JSON"));

    let mut has_unknown = check_keys(obj, "", KNOWN_TOP_LEVEL, &mut diagnostics);
    for (section, known) in [
        ("logging", KNOWN_LOGGING),
        ("device", KNOWN_DEVICE),
        ("locale", KNOWN_LOCALE),
    ] {
        if let Some(inner) = obj.get(section).and_then(|v| v.as_object()) {
            has_unknown |= check_keys(inner, section, known, &mut diagnostics);
        }
    }

    if !has_unknown {
        diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Ok,
            "",
            "All fields recognized",
        ));
    }

    if let Some(format) = raw.pointer("/logging/format").and_then(|v| v.as_str()) {
        if !LOG_FORMATS.contains(&format) {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Error,
                "logging.format",
                format!(
                    "Unknown format '{}', expected one of: {}",
                    format,
                    LOG_FORMATS.join(", ")
                ),
            ));
        }
    }

    if let Some(port) = raw.pointer("/device/port").and_then(|v| v.as_str()) {
        if let Err(e) = validate_serial_path(port) {
            diagnostics.push(Diagnostic::new(DiagnosticLevel::Error, "device.port", e));
        }
    }

    if let Some(path) = raw.pointer("/locale/translations").and_then(|v| v.as_str()) {
        if !path.starts_with('~') && !std::path::Path::new(path).exists() {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Warn,
                "locale.translations",
                format!("File not found: {}", path),
            ));
        }
    }

    diagnostics
}
