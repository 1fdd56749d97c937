//! Error types for esp32blocks
//!
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations. The device adapter never wraps errors coming
//! back from a peripheral; they surface exactly as the peripheral produced them.

use thiserror::Error;

/// The primary error type for esp32blocks operations.
#[derive(Error, Debug)]
pub enum BlocksError {
    /// Configuration-related errors (invalid config, unreadable translation file, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors raised by a peripheral or its link (unreachable device, bad response, etc.)
    #[error("Peripheral error: {0}")]
    Peripheral(String),

    /// The host asked for an opcode this device does not declare
    #[error("Unknown opcode: {0}")]
    UnknownOpcode(String),

    /// A block argument was missing or could not be converted to its declared type
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// The block exists only for generated firmware and cannot run live
    #[error("Block '{0}' is only available in upload mode")]
    UploadOnly(String),

    /// The catalog references something it does not define
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BlocksError {
    /// Shorthand for an [`BlocksError::InvalidArgument`].
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BlocksError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized `Result` type for esp32blocks operations.
pub type Result<T> = std::result::Result<T, BlocksError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BlocksError::Config("missing translations file".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing translations file"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BlocksError = io_err.into();
        assert!(matches!(err, BlocksError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: BlocksError = json_err.into();
        assert!(matches!(err, BlocksError::Json(_)));
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = BlocksError::invalid_argument("PIN", "expected a pin number");
        assert_eq!(err.to_string(), "Invalid argument PIN: expected a pin number");
    }

    #[test]
    fn test_upload_only_display() {
        let err = BlocksError::UploadOnly("consolePrint".into());
        assert!(err.to_string().contains("consolePrint"));
        assert!(err.to_string().contains("upload mode"));
    }

    #[test]
    fn test_error_variants() {
        let _ = BlocksError::Config("test".into());
        let _ = BlocksError::Peripheral("test".into());
        let _ = BlocksError::UnknownOpcode("test".into());
        let _ = BlocksError::invalid_argument("A", "b");
        let _ = BlocksError::UploadOnly("test".into());
        let _ = BlocksError::Catalog("test".into());
    }
}
