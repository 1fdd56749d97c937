//! Conversion of host block arguments into typed values.
//!
//! The host passes arguments as a JSON object keyed by placeholder name. Menu
//! values usually arrive as strings, numeric slots as numbers or numeric
//! strings, depending on whether a reporter was dropped into the slot.

use std::str::FromStr;

use serde_json::Value;

use crate::blocks::{Level, Pin};
use crate::error::{BlocksError, Result};

pub(crate) fn get<'a>(args: &'a Value, name: &str) -> Result<&'a Value> {
    args.get(name)
        .ok_or_else(|| BlocksError::invalid_argument(name, "missing"))
}

/// A menu-bound string argument parsed into its enumeration.
pub(crate) fn menu<T>(args: &Value, name: &str) -> Result<T>
where
    T: FromStr<Err = BlocksError>,
{
    match get(args, name)? {
        Value::String(s) => s.parse(),
        other => Err(BlocksError::invalid_argument(
            name,
            format!("expected a string, got {other}"),
        )),
    }
}

pub(crate) fn pin(args: &Value) -> Result<Pin> {
    match get(args, "PIN")? {
        Value::String(s) => s.parse(),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(Pin::from_number)
            .ok_or_else(|| BlocksError::invalid_argument("PIN", format!("no ESP32 pin {n}"))),
        other => Err(BlocksError::invalid_argument(
            "PIN",
            format!("expected a pin, got {other}"),
        )),
    }
}

pub(crate) fn level(args: &Value) -> Result<Level> {
    match get(args, "LEVEL")? {
        Value::String(s) => s.parse(),
        Value::Bool(b) => Ok(Level::from(*b)),
        Value::Number(n) => match n.as_u64() {
            Some(1) => Ok(Level::High),
            Some(0) => Ok(Level::Low),
            _ => Err(BlocksError::invalid_argument(
                "LEVEL",
                format!("'{n}' is not a logic level"),
            )),
        },
        other => Err(BlocksError::invalid_argument(
            "LEVEL",
            format!("expected a level, got {other}"),
        )),
    }
}

pub(crate) fn number(args: &Value, name: &str) -> Result<f64> {
    let value = match get(args, name)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value
        .filter(|v| v.is_finite())
        .ok_or_else(|| BlocksError::invalid_argument(name, "expected a number"))
}

/// A whole number in `0..=max`, the range of the slot's `uint8_number` or
/// `uint10_number` type.
pub(crate) fn uint(args: &Value, name: &str, max: u16) -> Result<u16> {
    let value = number(args, name)?;
    if value.fract() != 0.0 || value < 0.0 || value > f64::from(max) {
        return Err(BlocksError::invalid_argument(
            name,
            format!("{value} is not a whole number in 0..={max}"),
        ));
    }
    Ok(value as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PinMode;
    use serde_json::json;

    #[test]
    fn test_pin_from_string_and_number() {
        assert_eq!(pin(&json!({"PIN": "2"})).unwrap(), Pin::Io2);
        assert_eq!(pin(&json!({"PIN": 33})).unwrap(), Pin::Io33);
    }

    #[test]
    fn test_pin_missing_or_invalid() {
        let err = pin(&json!({})).unwrap_err();
        assert_eq!(err.to_string(), "Invalid argument PIN: missing");
        assert!(pin(&json!({"PIN": 20})).is_err());
        assert!(pin(&json!({"PIN": 300})).is_err());
        assert!(pin(&json!({"PIN": true})).is_err());
    }

    #[test]
    fn test_menu_parses_enumeration() {
        let mode: PinMode = menu(&json!({"MODE": "OUT"}), "MODE").unwrap();
        assert_eq!(mode, PinMode::Output);
        assert!(menu::<PinMode>(&json!({"MODE": 1}), "MODE").is_err());
    }

    #[test]
    fn test_level_forms() {
        assert_eq!(level(&json!({"LEVEL": "1"})).unwrap(), Level::High);
        assert_eq!(level(&json!({"LEVEL": 0})).unwrap(), Level::Low);
        assert_eq!(level(&json!({"LEVEL": true})).unwrap(), Level::High);
        assert!(level(&json!({"LEVEL": 5})).is_err());
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(number(&json!({"OUT": 90}), "OUT").unwrap(), 90.0);
        assert_eq!(number(&json!({"OUT": "12.5"}), "OUT").unwrap(), 12.5);
        assert!(number(&json!({"OUT": "abc"}), "OUT").is_err());
        assert!(number(&json!({"OUT": null}), "OUT").is_err());
    }

    #[test]
    fn test_uint_range() {
        assert_eq!(uint(&json!({"OUT": "1023"}), "OUT", 1023).unwrap(), 1023);
        assert_eq!(uint(&json!({"OUT": 0}), "OUT", 255).unwrap(), 0);
        assert!(uint(&json!({"OUT": 256}), "OUT", 255).is_err());
        assert!(uint(&json!({"OUT": -1}), "OUT", 255).is_err());
        assert!(uint(&json!({"OUT": 1.5}), "OUT", 255).is_err());
    }
}
