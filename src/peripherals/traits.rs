//! The capability interface every microcontroller peripheral implements.

use crate::blocks::{Level, Pin, PinMode};
use crate::error::Result;

/// Pin-level operations a connected board must support.
///
/// Implementations own whatever transport they need; callers see only typed
/// pins and values. Errors (unreachable board, malformed reply, a pin the
/// board refuses) come back exactly as the implementation reports them.
#[cfg_attr(test, mockall::automock)]
pub trait Peripheral: Send + Sync {
    /// Configure direction and pulls of `pin`.
    fn init_pin_mode(&self, pin: Pin, mode: PinMode) -> Result<()>;

    fn set_digital_output(&self, pin: Pin, level: Level) -> Result<()>;

    /// Drive a PWM duty cycle in `0..=1023`.
    fn set_pwm_output(&self, pin: Pin, value: u16) -> Result<()>;

    /// Drive the DAC to `value` in `0..=255`.
    fn set_dac_output(&self, pin: Pin, value: u8) -> Result<()>;

    fn read_digital_pin(&self, pin: Pin) -> Result<bool>;

    fn read_analog_pin(&self, pin: Pin) -> Result<f64>;

    fn read_touch_pin(&self, pin: Pin) -> Result<f64>;

    /// Move a hobby servo on `pin` to `angle` degrees.
    fn set_servo_output(&self, pin: Pin, angle: f64) -> Result<()>;
}

/// Request/response channel to a board.
///
/// Framing, acknowledgement and retry all live behind this trait; a peripheral
/// stub only names a method and passes JSON params.
#[cfg_attr(test, mockall::automock)]
pub trait Link: Send + Sync {
    fn request(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value>;
}
