//! Hardware peripherals.
//!
//! A peripheral is anything that can carry out pin-level operations on a
//! board. [`Peripheral`] is the capability the device adapter forwards to;
//! [`esp32::MicroPythonEsp32`] is the stub that turns those calls into
//! requests over a [`Link`].

pub mod board_profile;
pub mod esp32;
pub mod traits;

pub use traits::{Link, Peripheral};

/// Validate a serial port path.
///
/// Only allows known serial device path prefixes so a misconfigured port
/// cannot point the link at an arbitrary file.
pub fn validate_serial_path(path: &str) -> std::result::Result<(), String> {
    const ALLOWED_PATH_PREFIXES: &[&str] = &[
        "/dev/ttyUSB",
        "/dev/ttyACM",
        "/dev/tty.usbserial",
        "/dev/cu.usbserial",
        "/dev/tty.wchusbserial",
        "/dev/cu.wchusbserial",
        "/dev/tty.SLAB_USBtoUART",
        "/dev/cu.SLAB_USBtoUART",
        "COM",
    ];

    if ALLOWED_PATH_PREFIXES.iter().any(|p| path.starts_with(p)) {
        Ok(())
    } else {
        Err(format!(
            "Serial path not allowed: {}. Allowed prefixes: {}",
            path,
            ALLOWED_PATH_PREFIXES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_serial_path_linux() {
        assert!(validate_serial_path("/dev/ttyUSB0").is_ok());
        assert!(validate_serial_path("/dev/ttyACM1").is_ok());
    }

    #[test]
    fn test_validate_serial_path_macos_bridges() {
        // CH340 and CP2102 bridges as macOS names them
        assert!(validate_serial_path("/dev/cu.wchusbserial1420").is_ok());
        assert!(validate_serial_path("/dev/tty.SLAB_USBtoUART").is_ok());
        assert!(validate_serial_path("/dev/cu.usbserial-0001").is_ok());
    }

    #[test]
    fn test_validate_serial_path_windows() {
        assert!(validate_serial_path("COM3").is_ok());
    }

    #[test]
    fn test_validate_serial_path_rejects_arbitrary() {
        assert!(validate_serial_path("/dev/sda1").is_err());
        assert!(validate_serial_path("/etc/passwd").is_err());
        assert!(validate_serial_path("").is_err());
    }

    #[test]
    fn test_validate_serial_path_error_message() {
        let err = validate_serial_path("/tmp/fake").unwrap_err();
        assert!(err.contains("not allowed"));
        assert!(err.contains("/tmp/fake"));
    }
}
