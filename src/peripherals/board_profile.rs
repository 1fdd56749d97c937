//! Board profile registry.
//!
//! Provides static [`BoardProfile`] definitions describing which GPIOs of a
//! board can drive outputs, sample analog voltages, run the DAC or sense touch.
//! The block menus are derived from these lists, so a pin never shows up in a
//! menu for a capability it lacks.
//!
//! # Example
//!
//! ```
//! use esp32blocks::blocks::Pin;
//! use esp32blocks::peripherals::board_profile::ESP32_PROFILE;
//!
//! assert!(ESP32_PROFILE.is_valid_gpio(Pin::Io21));
//! assert!(ESP32_PROFILE.is_valid_adc(Pin::Io34));
//! assert!(!ESP32_PROFILE.is_valid_output(Pin::Io34));
//! ```

use crate::blocks::Pin;

/// Static capability description for a microcontroller board.
///
/// All slices are `'static` so profiles can be stored as `const` values
/// without heap allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProfile {
    /// Human-readable board name (e.g. `"esp32"`).
    pub name: &'static str,
    /// Pins free for general use.
    pub gpio_pins: &'static [Pin],
    /// Pins that can drive an output (subset of `gpio_pins`).
    pub output_pins: &'static [Pin],
    /// ADC-capable pins usable alongside wifi (subset of `gpio_pins`).
    pub adc_pins: &'static [Pin],
    /// DAC-capable pins.
    pub dac_pins: &'static [Pin],
    /// Capacitive touch pins.
    pub touch_pins: &'static [Pin],
}

impl BoardProfile {
    /// Returns `true` if `pin` is listed as a general-purpose GPIO pin.
    pub fn is_valid_gpio(&self, pin: Pin) -> bool {
        self.gpio_pins.contains(&pin)
    }

    pub fn is_valid_output(&self, pin: Pin) -> bool {
        self.output_pins.contains(&pin)
    }

    /// Returns `true` if `pin` supports ADC (analogue-to-digital conversion).
    pub fn is_valid_adc(&self, pin: Pin) -> bool {
        self.adc_pins.contains(&pin)
    }

    pub fn is_valid_dac(&self, pin: Pin) -> bool {
        self.dac_pins.contains(&pin)
    }

    pub fn is_valid_touch(&self, pin: Pin) -> bool {
        self.touch_pins.contains(&pin)
    }
}

// ---------------------------------------------------------------------------
// Built-in profiles
// ---------------------------------------------------------------------------

/// Board profile for the Espressif ESP32 running MicroPython.
///
/// IO1/IO3 carry the REPL UART and IO6-IO11 are wired to the SPI flash, so
/// none of them are offered. IO34-IO39 are input only. ADC block 2 is taken
/// by wifi, leaving the six ADC block 1 pins.
pub const ESP32_PROFILE: BoardProfile = BoardProfile {
    name: "esp32",
    gpio_pins: &[
        Pin::Io0,
        Pin::Io2,
        Pin::Io4,
        Pin::Io5,
        Pin::Io12,
        Pin::Io13,
        Pin::Io14,
        Pin::Io15,
        Pin::Io16,
        Pin::Io17,
        Pin::Io18,
        Pin::Io19,
        Pin::Io21,
        Pin::Io22,
        Pin::Io23,
        Pin::Io25,
        Pin::Io26,
        Pin::Io27,
        Pin::Io32,
        Pin::Io33,
        Pin::Io34,
        Pin::Io35,
        Pin::Io36,
        Pin::Io39,
    ],
    output_pins: &[
        Pin::Io0,
        Pin::Io2,
        Pin::Io4,
        Pin::Io5,
        Pin::Io12,
        Pin::Io13,
        Pin::Io14,
        Pin::Io15,
        Pin::Io16,
        Pin::Io17,
        Pin::Io18,
        Pin::Io19,
        Pin::Io21,
        Pin::Io22,
        Pin::Io23,
        Pin::Io25,
        Pin::Io26,
        Pin::Io27,
        Pin::Io32,
        Pin::Io33,
    ],
    adc_pins: &[
        Pin::Io32,
        Pin::Io33,
        Pin::Io34,
        Pin::Io35,
        Pin::Io36,
        Pin::Io39,
    ],
    dac_pins: &[Pin::Io25, Pin::Io26],
    touch_pins: &[
        Pin::Io0,
        Pin::Io2,
        Pin::Io4,
        Pin::Io12,
        Pin::Io13,
        Pin::Io14,
        Pin::Io15,
        Pin::Io27,
        Pin::Io32,
        Pin::Io33,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    fn is_subset(sub: &[Pin], of: &[Pin]) -> bool {
        sub.iter().all(|p| of.contains(p))
    }

    #[test]
    fn test_esp32_profile_name() {
        assert_eq!(ESP32_PROFILE.name, "esp32");
    }

    #[test]
    fn test_reserved_pins_excluded() {
        for pin in [
            Pin::Io1,
            Pin::Io3,
            Pin::Io6,
            Pin::Io7,
            Pin::Io8,
            Pin::Io9,
            Pin::Io10,
            Pin::Io11,
        ] {
            assert!(!ESP32_PROFILE.is_valid_gpio(pin), "{pin} should be reserved");
        }
    }

    #[test]
    fn test_input_only_pins_not_outputs() {
        for pin in [Pin::Io34, Pin::Io35, Pin::Io36, Pin::Io39] {
            assert!(ESP32_PROFILE.is_valid_gpio(pin));
            assert!(!ESP32_PROFILE.is_valid_output(pin));
        }
    }

    #[test]
    fn test_capability_lists_are_gpio_subsets() {
        assert!(is_subset(ESP32_PROFILE.output_pins, ESP32_PROFILE.gpio_pins));
        assert!(is_subset(ESP32_PROFILE.adc_pins, ESP32_PROFILE.gpio_pins));
        assert!(is_subset(ESP32_PROFILE.dac_pins, ESP32_PROFILE.output_pins));
        assert!(is_subset(ESP32_PROFILE.touch_pins, ESP32_PROFILE.gpio_pins));
    }

    #[test]
    fn test_adc_block_two_excluded() {
        assert!(ESP32_PROFILE.is_valid_adc(Pin::Io36));
        assert!(!ESP32_PROFILE.is_valid_adc(Pin::Io2));
        assert!(!ESP32_PROFILE.is_valid_adc(Pin::Io25));
    }

    #[test]
    fn test_dac_and_touch() {
        assert!(ESP32_PROFILE.is_valid_dac(Pin::Io25));
        assert!(ESP32_PROFILE.is_valid_dac(Pin::Io26));
        assert!(!ESP32_PROFILE.is_valid_dac(Pin::Io27));
        assert!(ESP32_PROFILE.is_valid_touch(Pin::Io27));
        assert!(!ESP32_PROFILE.is_valid_touch(Pin::Io26));
    }

    #[test]
    fn test_esp32_gpio_pin_count() {
        assert_eq!(ESP32_PROFILE.gpio_pins.len(), 24);
        assert_eq!(ESP32_PROFILE.output_pins.len(), 20);
        assert_eq!(ESP32_PROFILE.touch_pins.len(), 10);
    }
}
