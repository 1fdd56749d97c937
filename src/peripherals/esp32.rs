//! MicroPython ESP32 peripheral.
//!
//! A thin stub: it carries the connection profile the host needs to find and
//! open the board (USB filters, serial settings, firmware options) and turns
//! each [`Peripheral`] call into a single [`Link::request`]. Everything about
//! how the request travels is the link's business.
//!
//! # Protocol
//!
//! | Method            | Params                 | Response      |
//! |-------------------|------------------------|---------------|
//! | `initPinMode`     | `pin`, `mode`          | ignored       |
//! | `setDigitalOutput`| `pin`, `level`         | ignored       |
//! | `setPwmOutput`    | `pin`, `value`         | ignored       |
//! | `setDACOutput`    | `pin`, `value`         | ignored       |
//! | `setServoOutput`  | `pin`, `angle`         | ignored       |
//! | `readDigitalPin`  | `pin`                  | bool or 0/1   |
//! | `readAnalogPin`   | `pin`                  | number        |
//! | `readTouchPin`    | `pin`                  | number        |
//!
//! Pins, modes and levels travel as their menu wire strings (`"2"`, `"IN"`, `"1"`).

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

use super::traits::{Link, Peripheral};
use crate::blocks::{Level, MenuValue, Pin, PinMode};
use crate::error::{BlocksError, Result};
use crate::log_component;

/// USB PNP ids of the USB-serial bridges found on common ESP32 boards.
pub const PNPID_LIST: &[&str] = &[
    // CH340
    "USB\\VID_1A86&PID_7523",
    // CH9102
    "USB\\VID_1A86&PID_55D4",
    // CP2102
    "USB\\VID_10C4&PID_EA60",
];

/// Serial line settings for the MicroPython REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    /// Hang up (drop DTR) on close. Off, or the board resets.
    pub hupcl: bool,
}

pub const SERIAL_CONFIG: SerialConfig = SerialConfig {
    baud_rate: 57600,
    data_bits: 8,
    stop_bits: 1,
    hupcl: false,
};

/// Parameters handed to the flashing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FirmwareOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub chip: &'static str,
    pub baud: &'static str,
    pub firmware: &'static str,
}

pub const FIRMWARE_OPTIONS: FirmwareOptions = FirmwareOptions {
    kind: "microPython",
    chip: "esp32",
    baud: "921600",
    firmware: "esp32-20220117-v1.18.bin",
};

/// A USB vendor/product id pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UsbFilter {
    pub vid: u16,
    pub pid: u16,
}

impl UsbFilter {
    /// Parse a Windows-style PNP id such as `USB\VID_1A86&PID_7523`.
    pub fn parse(pnp_id: &str) -> Option<UsbFilter> {
        let rest = pnp_id.strip_prefix("USB\\")?;
        let (vid, pid) = rest.split_once('&')?;
        let vid = u16::from_str_radix(vid.strip_prefix("VID_")?, 16).ok()?;
        let pid = u16::from_str_radix(pid.strip_prefix("PID_")?, 16).ok()?;
        Some(UsbFilter { vid, pid })
    }

    pub fn matches(&self, vid: u16, pid: u16) -> bool {
        self.vid == vid && self.pid == pid
    }
}

impl fmt::Display for UsbFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.vid, self.pid)
    }
}

/// Everything the host needs to know to connect to and flash the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeripheralProfile {
    pub device_id: String,
    /// Id the board was registered under, e.g. `xxx_microPythonEsp32`.
    pub original_device_id: String,
    pub usb_filters: Vec<UsbFilter>,
    pub serial: SerialConfig,
    pub firmware: FirmwareOptions,
}

impl PeripheralProfile {
    pub fn esp32(device_id: &str, original_device_id: &str) -> Self {
        Self {
            device_id: device_id.to_string(),
            original_device_id: original_device_id.to_string(),
            usb_filters: PNPID_LIST
                .iter()
                .filter_map(|id| UsbFilter::parse(id))
                .collect(),
            serial: SERIAL_CONFIG,
            firmware: FIRMWARE_OPTIONS,
        }
    }

    /// Whether a USB device with this vendor/product id looks like our board.
    pub fn matches_usb(&self, vid: u16, pid: u16) -> bool {
        self.usb_filters.iter().any(|f| f.matches(vid, pid))
    }
}

/// MicroPython ESP32 board reached through a [`Link`].
pub struct MicroPythonEsp32 {
    profile: PeripheralProfile,
    link: Box<dyn Link>,
}

impl MicroPythonEsp32 {
    pub fn new(device_id: &str, original_device_id: &str, link: Box<dyn Link>) -> Self {
        Self {
            profile: PeripheralProfile::esp32(device_id, original_device_id),
            link,
        }
    }

    pub fn profile(&self) -> &PeripheralProfile {
        &self.profile
    }

    fn send(&self, method: &str, params: Value) -> Result<Value> {
        log_component!(
            debug,
            "esp32",
            "link request",
            device = self.profile.original_device_id.as_str(),
            method = method
        );
        self.link.request(method, params)
    }
}

fn decode_bool(method: &str, value: &Value) -> Result<bool> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
        other => Err(BlocksError::Peripheral(format!(
            "{method}: expected a boolean, got {other}"
        ))),
    }
}

fn decode_number(method: &str, value: &Value) -> Result<f64> {
    value.as_f64().ok_or_else(|| {
        BlocksError::Peripheral(format!("{method}: expected a number, got {value}"))
    })
}

impl Peripheral for MicroPythonEsp32 {
    fn init_pin_mode(&self, pin: Pin, mode: PinMode) -> Result<()> {
        self.send(
            "initPinMode",
            json!({ "pin": pin.value(), "mode": mode.value() }),
        )?;
        Ok(())
    }

    fn set_digital_output(&self, pin: Pin, level: Level) -> Result<()> {
        self.send(
            "setDigitalOutput",
            json!({ "pin": pin.value(), "level": level.value() }),
        )?;
        Ok(())
    }

    fn set_pwm_output(&self, pin: Pin, value: u16) -> Result<()> {
        self.send(
            "setPwmOutput",
            json!({ "pin": pin.value(), "value": value }),
        )?;
        Ok(())
    }

    fn set_dac_output(&self, pin: Pin, value: u8) -> Result<()> {
        self.send(
            "setDACOutput",
            json!({ "pin": pin.value(), "value": value }),
        )?;
        Ok(())
    }

    fn read_digital_pin(&self, pin: Pin) -> Result<bool> {
        let reply = self.send("readDigitalPin", json!({ "pin": pin.value() }))?;
        decode_bool("readDigitalPin", &reply)
    }

    fn read_analog_pin(&self, pin: Pin) -> Result<f64> {
        let reply = self.send("readAnalogPin", json!({ "pin": pin.value() }))?;
        decode_number("readAnalogPin", &reply)
    }

    fn read_touch_pin(&self, pin: Pin) -> Result<f64> {
        let reply = self.send("readTouchPin", json!({ "pin": pin.value() }))?;
        decode_number("readTouchPin", &reply)
    }

    fn set_servo_output(&self, pin: Pin, angle: f64) -> Result<()> {
        self.send(
            "setServoOutput",
            json!({ "pin": pin.value(), "angle": angle }),
        )?;
        Ok(())
    }
}
