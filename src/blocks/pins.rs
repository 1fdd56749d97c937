//! Typed pin, mode and level enumerations.
//!
//! Every value here has a fixed wire string: the string the host editor stores
//! in a project file and hands back as a block argument. `FromStr` accepts that
//! wire string (and, for pins, the `IOxx` label as well).

use std::fmt;
use std::str::FromStr;

use crate::error::BlocksError;

/// A value that can appear as an item in a block menu.
pub trait MenuValue: Copy + PartialEq + fmt::Debug + 'static {
    /// The wire string stored as the menu item's `value`.
    fn value(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Pin
// ---------------------------------------------------------------------------

/// A numbered ESP32 GPIO line.
///
/// GPIO 20, 24 and 28-31 do not exist on the ESP32 and have no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Pin {
    Io0 = 0,
    Io1 = 1,
    Io2 = 2,
    Io3 = 3,
    Io4 = 4,
    Io5 = 5,
    Io6 = 6,
    Io7 = 7,
    Io8 = 8,
    Io9 = 9,
    Io10 = 10,
    Io11 = 11,
    Io12 = 12,
    Io13 = 13,
    Io14 = 14,
    Io15 = 15,
    Io16 = 16,
    Io17 = 17,
    Io18 = 18,
    Io19 = 19,
    Io21 = 21,
    Io22 = 22,
    Io23 = 23,
    Io25 = 25,
    Io26 = 26,
    Io27 = 27,
    Io32 = 32,
    Io33 = 33,
    Io34 = 34,
    Io35 = 35,
    Io36 = 36,
    Io39 = 39,
}

const PIN_VALUES: [&str; 40] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16",
    "17", "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31", "32",
    "33", "34", "35", "36", "37", "38", "39",
];

const PIN_LABELS: [&str; 40] = [
    "IO0", "IO1", "IO2", "IO3", "IO4", "IO5", "IO6", "IO7", "IO8", "IO9", "IO10", "IO11", "IO12",
    "IO13", "IO14", "IO15", "IO16", "IO17", "IO18", "IO19", "IO20", "IO21", "IO22", "IO23", "IO24",
    "IO25", "IO26", "IO27", "IO28", "IO29", "IO30", "IO31", "IO32", "IO33", "IO34", "IO35", "IO36",
    "IO37", "IO38", "IO39",
];

impl Pin {
    /// Every pin label the ESP32 exposes, in GPIO order.
    pub const ALL: [Pin; 32] = [
        Pin::Io0,
        Pin::Io1,
        Pin::Io2,
        Pin::Io3,
        Pin::Io4,
        Pin::Io5,
        Pin::Io6,
        Pin::Io7,
        Pin::Io8,
        Pin::Io9,
        Pin::Io10,
        Pin::Io11,
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
    ];

    /// GPIO number.
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Display label, e.g. `"IO2"`.
    pub fn label(self) -> &'static str {
        PIN_LABELS[self as usize]
    }

    /// Look up a pin by GPIO number.
    pub fn from_number(number: u8) -> Option<Pin> {
        Self::ALL.iter().copied().find(|p| p.number() == number)
    }
}

impl MenuValue for Pin {
    fn value(&self) -> &'static str {
        PIN_VALUES[*self as usize]
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pin {
    type Err = BlocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("IO")
            .or_else(|| trimmed.strip_prefix("io"))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Pin::from_number)
            .ok_or_else(|| {
                BlocksError::invalid_argument("PIN", format!("'{s}' is not an ESP32 pin"))
            })
    }
}

// ---------------------------------------------------------------------------
// Small enumerations
// ---------------------------------------------------------------------------

/// Direction and pull configuration for a GPIO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinMode {
    Input,
    Output,
    InputPullup,
    InputPulldown,
}

impl PinMode {
    pub const ALL: [PinMode; 4] = [
        PinMode::Input,
        PinMode::Output,
        PinMode::InputPullup,
        PinMode::InputPulldown,
    ];
}

impl MenuValue for PinMode {
    fn value(&self) -> &'static str {
        match self {
            PinMode::Input => "IN",
            PinMode::Output => "OUT",
            PinMode::InputPullup => "PULL_UP",
            PinMode::InputPulldown => "PULL_DOWN",
        }
    }
}

impl FromStr for PinMode {
    type Err = BlocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PinMode::ALL
            .iter()
            .copied()
            .find(|m| m.value() == s.trim())
            .ok_or_else(|| BlocksError::invalid_argument("MODE", format!("unknown pin mode '{s}'")))
    }
}

/// Digital logic level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub const ALL: [Level; 2] = [Level::High, Level::Low];

    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl MenuValue for Level {
    fn value(&self) -> &'static str {
        match self {
            Level::High => "1",
            Level::Low => "0",
        }
    }
}

impl FromStr for Level {
    type Err = BlocksError;

    // The level menu accepts reporters, so plain words from other blocks are allowed too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "high" | "true" => Ok(Level::High),
            "0" | "low" | "false" => Ok(Level::Low),
            _ => Err(BlocksError::invalid_argument(
                "LEVEL",
                format!("'{s}' is not a logic level"),
            )),
        }
    }
}

/// Condition that fires a pin interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptMode {
    Rising,
    Falling,
    Change,
    LowLevel,
    HighLevel,
}

impl InterruptMode {
    pub const ALL: [InterruptMode; 5] = [
        InterruptMode::Rising,
        InterruptMode::Falling,
        InterruptMode::Change,
        InterruptMode::LowLevel,
        InterruptMode::HighLevel,
    ];
}

impl MenuValue for InterruptMode {
    fn value(&self) -> &'static str {
        match self {
            InterruptMode::Rising => "RISING",
            InterruptMode::Falling => "FALLING",
            InterruptMode::Change => "CHANGE",
            InterruptMode::LowLevel => "LOW_LEVEL",
            InterruptMode::HighLevel => "HIGH_LEVEL",
        }
    }
}

impl FromStr for InterruptMode {
    type Err = BlocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InterruptMode::ALL
            .iter()
            .copied()
            .find(|m| m.value() == s.trim())
            .ok_or_else(|| {
                BlocksError::invalid_argument("MODE", format!("unknown interrupt mode '{s}'"))
            })
    }
}

/// Line ending for the console print block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eol {
    /// Print followed by a newline.
    Warp,
    NoWarp,
}

impl Eol {
    pub const ALL: [Eol; 2] = [Eol::Warp, Eol::NoWarp];
}

impl MenuValue for Eol {
    fn value(&self) -> &'static str {
        match self {
            Eol::Warp => "warp",
            Eol::NoWarp => "noWarp",
        }
    }
}

impl FromStr for Eol {
    type Err = BlocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Eol::ALL
            .iter()
            .copied()
            .find(|e| e.value() == s.trim())
            .ok_or_else(|| {
                BlocksError::invalid_argument("EOL", format!("unknown line ending '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pin_number_and_label() {
        assert_eq!(Pin::Io2.number(), 2);
        assert_eq!(Pin::Io2.label(), "IO2");
        assert_eq!(Pin::Io2.value(), "2");
        assert_eq!(Pin::Io39.value(), "39");
        assert_eq!(Pin::Io39.label(), "IO39");
    }

    #[test]
    fn test_every_pin_value_matches_its_number() {
        for pin in Pin::ALL {
            assert_eq!(pin.value(), pin.number().to_string());
            assert_eq!(pin.label(), format!("IO{}", pin.number()));
        }
    }

    #[test]
    fn test_pin_values_unique() {
        let values: HashSet<_> = Pin::ALL.iter().map(|p| p.value()).collect();
        assert_eq!(values.len(), Pin::ALL.len());
    }

    #[test]
    fn test_pin_from_number_missing_gpio() {
        assert_eq!(Pin::from_number(25), Some(Pin::Io25));
        assert!(Pin::from_number(20).is_none());
        assert!(Pin::from_number(24).is_none());
        assert!(Pin::from_number(40).is_none());
    }

    #[test]
    fn test_pin_from_str_value_and_label() {
        assert_eq!("2".parse::<Pin>().unwrap(), Pin::Io2);
        assert_eq!("IO2".parse::<Pin>().unwrap(), Pin::Io2);
        assert_eq!(" 33 ".parse::<Pin>().unwrap(), Pin::Io33);
        assert!("IO20".parse::<Pin>().is_err());
        assert!("abc".parse::<Pin>().is_err());
        assert!("".parse::<Pin>().is_err());
    }

    #[test]
    fn test_pin_mode_roundtrip_through_value() {
        for mode in PinMode::ALL {
            assert_eq!(mode.value().parse::<PinMode>().unwrap(), mode);
        }
        assert!("INPUT".parse::<PinMode>().is_err());
    }

    #[test]
    fn test_level_parse() {
        assert_eq!("1".parse::<Level>().unwrap(), Level::High);
        assert_eq!("0".parse::<Level>().unwrap(), Level::Low);
        assert_eq!("HIGH".parse::<Level>().unwrap(), Level::High);
        assert_eq!("false".parse::<Level>().unwrap(), Level::Low);
        assert!("2".parse::<Level>().is_err());
    }

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert!(!Level::from(false).is_high());
    }

    #[test]
    fn test_interrupt_mode_values() {
        let values: Vec<_> = InterruptMode::ALL.iter().map(|m| m.value()).collect();
        assert_eq!(
            values,
            vec!["RISING", "FALLING", "CHANGE", "LOW_LEVEL", "HIGH_LEVEL"]
        );
        assert_eq!(
            "LOW_LEVEL".parse::<InterruptMode>().unwrap(),
            InterruptMode::LowLevel
        );
    }

    #[test]
    fn test_eol_values() {
        assert_eq!(Eol::Warp.value(), "warp");
        assert_eq!("noWarp".parse::<Eol>().unwrap(), Eol::NoWarp);
        assert!("nowarp".parse::<Eol>().is_err());
    }
}
