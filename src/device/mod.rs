//! The ESP32 device adapter.
//!
//! [`Esp32Device`] is what the host runtime talks to. It publishes the block
//! catalog through [`Esp32Device::get_info`] and runs blocks by forwarding to
//! the [`Peripheral`] it owns. Each call is an independent forward: nothing is
//! cached, retried or translated on the way through.
//!
//! # Example
//!
//! ```
//! use esp32blocks::blocks::{Level, Pin};
//! use esp32blocks::device::{BlockOutput, Esp32Device};
//! use esp32blocks::peripherals::Peripheral;
//! # use esp32blocks::blocks::PinMode;
//! # use esp32blocks::Result;
//! # struct Board;
//! # impl Peripheral for Board {
//! #     fn init_pin_mode(&self, _: Pin, _: PinMode) -> Result<()> { Ok(()) }
//! #     fn set_digital_output(&self, _: Pin, _: Level) -> Result<()> { Ok(()) }
//! #     fn set_pwm_output(&self, _: Pin, _: u16) -> Result<()> { Ok(()) }
//! #     fn set_dac_output(&self, _: Pin, _: u8) -> Result<()> { Ok(()) }
//! #     fn read_digital_pin(&self, _: Pin) -> Result<bool> { Ok(true) }
//! #     fn read_analog_pin(&self, _: Pin) -> Result<f64> { Ok(0.0) }
//! #     fn read_touch_pin(&self, _: Pin) -> Result<f64> { Ok(0.0) }
//! #     fn set_servo_output(&self, _: Pin, _: f64) -> Result<()> { Ok(()) }
//! # }
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let device = Esp32Device::new(Box::new(Board));
//! device.set_digital_output(Pin::Io2, Level::High).await.unwrap();
//!
//! let out = device.execute("esp32ReadDigitalPin", &json!({"PIN": "2"})).unwrap();
//! assert_eq!(out, BlockOutput::Boolean(true));
//! # });
//! ```

mod args;

use futures::future::{ready, Ready};
use serde::Serialize;
use serde_json::Value;

use crate::blocks::{catalog, Category, Level, MenuValue, Opcode, Pin, PinMode};
use crate::error::{BlocksError, Result};
use crate::i18n::Localizer;
use crate::log_component;
use crate::peripherals::esp32::MicroPythonEsp32;
use crate::peripherals::{Link, Peripheral};

/// Completion of a write block. Always already settled.
pub type Completion = Ready<Result<()>>;

/// Value produced by running a block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlockOutput {
    /// Command blocks report nothing.
    Done,
    Boolean(bool),
    Number(f64),
}

/// Blocks for a MicroPython ESP32 board.
pub struct Esp32Device {
    peripheral: Box<dyn Peripheral>,
}

impl Esp32Device {
    /// Extension id the host registers this device under.
    pub const DEVICE_ID: &'static str = "microPythonEsp32";

    pub fn new(peripheral: Box<dyn Peripheral>) -> Self {
        Self { peripheral }
    }

    /// Adapter over a [`MicroPythonEsp32`] stub talking through `link`.
    pub fn with_link(original_device_id: &str, link: Box<dyn Link>) -> Self {
        Self::new(Box::new(MicroPythonEsp32::new(
            Self::DEVICE_ID,
            original_device_id,
            link,
        )))
    }

    /// Metadata for this device and its blocks.
    pub fn get_info(&self, localizer: &dyn Localizer) -> Result<Vec<Category>> {
        catalog::get_info(localizer)
    }

    // -----------------------------------------------------------------------
    // Write blocks
    // -----------------------------------------------------------------------

    pub fn init_pin_mode(&self, pin: Pin, mode: PinMode) -> Completion {
        log_component!(
            debug,
            "device",
            "init pin mode",
            pin = pin.number(),
            mode = mode.value()
        );
        ready(self.peripheral.init_pin_mode(pin, mode))
    }

    pub fn set_digital_output(&self, pin: Pin, level: Level) -> Completion {
        log_component!(
            debug,
            "device",
            "set digital output",
            pin = pin.number(),
            level = level.value()
        );
        ready(self.peripheral.set_digital_output(pin, level))
    }

    pub fn set_pwm_output(&self, pin: Pin, value: u16) -> Completion {
        log_component!(
            debug,
            "device",
            "set pwm output",
            pin = pin.number(),
            value = value
        );
        ready(self.peripheral.set_pwm_output(pin, value))
    }

    pub fn set_dac_output(&self, pin: Pin, value: u8) -> Completion {
        log_component!(
            debug,
            "device",
            "set dac output",
            pin = pin.number(),
            value = value
        );
        ready(self.peripheral.set_dac_output(pin, value))
    }

    pub fn set_servo_output(&self, pin: Pin, angle: f64) -> Completion {
        log_component!(
            debug,
            "device",
            "set servo output",
            pin = pin.number(),
            angle = angle
        );
        ready(self.peripheral.set_servo_output(pin, angle))
    }

    // -----------------------------------------------------------------------
    // Read blocks
    // -----------------------------------------------------------------------

    /// `true` for a high level.
    pub fn read_digital_pin(&self, pin: Pin) -> Result<bool> {
        log_component!(debug, "device", "read digital pin", pin = pin.number());
        self.peripheral.read_digital_pin(pin)
    }

    pub fn read_analog_pin(&self, pin: Pin) -> Result<f64> {
        log_component!(debug, "device", "read analog pin", pin = pin.number());
        self.peripheral.read_analog_pin(pin)
    }

    pub fn read_touch_pin(&self, pin: Pin) -> Result<f64> {
        log_component!(debug, "device", "read touch pin", pin = pin.number());
        self.peripheral.read_touch_pin(pin)
    }

    // -----------------------------------------------------------------------
    // Host dispatch
    // -----------------------------------------------------------------------

    /// Run the block `opcode` with the host's argument object.
    ///
    /// Upload-only blocks (interrupts, console) exist for the code generator
    /// and are refused here.
    pub fn execute(&self, opcode: &str, args: &Value) -> Result<BlockOutput> {
        let opcode: Opcode = opcode.parse()?;
        if !catalog::block_spec(opcode).runs_in_realtime() {
            return Err(BlocksError::UploadOnly(opcode.to_string()));
        }

        match opcode {
            Opcode::InitPinMode => {
                let pin = args::pin(args)?;
                let mode: PinMode = args::menu(args, "MODE")?;
                self.init_pin_mode(pin, mode).into_inner()?;
                Ok(BlockOutput::Done)
            }
            Opcode::SetDigitalOutput => {
                let pin = args::pin(args)?;
                let level = args::level(args)?;
                self.set_digital_output(pin, level).into_inner()?;
                Ok(BlockOutput::Done)
            }
            Opcode::SetPwmOutput => {
                let pin = args::pin(args)?;
                let value = args::uint(args, "OUT", 1023)?;
                self.set_pwm_output(pin, value).into_inner()?;
                Ok(BlockOutput::Done)
            }
            Opcode::SetDacOutput => {
                let pin = args::pin(args)?;
                let value = args::uint(args, "OUT", u8::MAX.into())?;
                self.set_dac_output(pin, value as u8).into_inner()?;
                Ok(BlockOutput::Done)
            }
            Opcode::SetServoOutput => {
                let pin = args::pin(args)?;
                let angle = args::number(args, "OUT")?;
                self.set_servo_output(pin, angle).into_inner()?;
                Ok(BlockOutput::Done)
            }
            Opcode::ReadDigitalPin => {
                let pin = args::pin(args)?;
                self.read_digital_pin(pin).map(BlockOutput::Boolean)
            }
            Opcode::ReadAnalogPin => {
                let pin = args::pin(args)?;
                self.read_analog_pin(pin).map(BlockOutput::Number)
            }
            Opcode::ReadTouchPin => {
                let pin = args::pin(args)?;
                self.read_touch_pin(pin).map(BlockOutput::Number)
            }
            Opcode::AttachInterrupt | Opcode::ConsolePrint | Opcode::ConsoleInput => {
                Err(BlocksError::UploadOnly(opcode.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DefaultLocalizer;
    use crate::peripherals::traits::MockPeripheral;
    use futures::FutureExt;
    use mockall::predicate::eq;
    use serde_json::json;

    fn device(peripheral: MockPeripheral) -> Esp32Device {
        Esp32Device::new(Box::new(peripheral))
    }

    #[test]
    fn test_device_id() {
        assert_eq!(Esp32Device::DEVICE_ID, "microPythonEsp32");
    }

    #[test]
    fn test_get_info_lists_both_categories() {
        let info = device(MockPeripheral::new())
            .get_info(&DefaultLocalizer)
            .unwrap();
        assert_eq!(info.len(), 2);
    }

    #[test]
    fn test_write_forwards_once_and_is_settled() {
        let mut peripheral = MockPeripheral::new();
        peripheral
            .expect_set_digital_output()
            .with(eq(Pin::Io2), eq(Level::High))
            .times(1)
            .returning(|_, _| Ok(()));
        let completion = device(peripheral).set_digital_output(Pin::Io2, Level::High);
        // already resolved: no executor needed
        assert!(completion.now_or_never().unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_write_completion_awaits() {
        let mut peripheral = MockPeripheral::new();
        peripheral
            .expect_set_pwm_output()
            .with(eq(Pin::Io5), eq(700u16))
            .times(1)
            .returning(|_, _| Ok(()));
        device(peripheral)
            .set_pwm_output(Pin::Io5, 700)
            .await
            .unwrap();
    }

    #[test]
    fn test_write_error_passes_through() {
        let mut peripheral = MockPeripheral::new();
        peripheral
            .expect_set_dac_output()
            .returning(|_, _| Err(BlocksError::Peripheral("link down".into())));
        let err = device(peripheral)
            .set_dac_output(Pin::Io25, 10)
            .now_or_never()
            .unwrap()
            .unwrap_err();
        assert_eq!(err.to_string(), "Peripheral error: link down");
    }

    #[test]
    fn test_reads_are_identity() {
        let mut peripheral = MockPeripheral::new();
        peripheral
            .expect_read_digital_pin()
            .with(eq(Pin::Io4))
            .returning(|_| Ok(false));
        peripheral
            .expect_read_analog_pin()
            .with(eq(Pin::Io36))
            .returning(|_| Ok(1234.0));
        peripheral
            .expect_read_touch_pin()
            .with(eq(Pin::Io15))
            .returning(|_| Ok(-0.5));
        let dev = device(peripheral);
        assert!(!dev.read_digital_pin(Pin::Io4).unwrap());
        assert_eq!(dev.read_analog_pin(Pin::Io36).unwrap(), 1234.0);
        assert_eq!(dev.read_touch_pin(Pin::Io15).unwrap(), -0.5);
    }

    #[test]
    fn test_execute_init_pin_mode() {
        let mut peripheral = MockPeripheral::new();
        peripheral
            .expect_init_pin_mode()
            .with(eq(Pin::Io2), eq(PinMode::Output))
            .times(1)
            .returning(|_, _| Ok(()));
        let out = device(peripheral)
            .execute("esp32InitPinMode", &json!({"PIN": "2", "MODE": "OUT"}))
            .unwrap();
        assert_eq!(out, BlockOutput::Done);
    }

    #[test]
    fn test_execute_servo_and_dac() {
        let mut peripheral = MockPeripheral::new();
        peripheral
            .expect_set_servo_output()
            .with(eq(Pin::Io13), eq(90.0))
            .times(1)
            .returning(|_, _| Ok(()));
        peripheral
            .expect_set_dac_output()
            .with(eq(Pin::Io26), eq(255u8))
            .times(1)
            .returning(|_, _| Ok(()));
        let dev = device(peripheral);
        dev.execute("esp32SetServoOutput", &json!({"PIN": "13", "OUT": "90"}))
            .unwrap();
        dev.execute("esp32SetDACOutput", &json!({"PIN": "26", "OUT": 255}))
            .unwrap();
    }

    #[test]
    fn test_execute_reads() {
        let mut peripheral = MockPeripheral::new();
        peripheral
            .expect_read_digital_pin()
            .returning(|_| Ok(true));
        peripheral.expect_read_touch_pin().returning(|_| Ok(88.0));
        let dev = device(peripheral);
        assert_eq!(
            dev.execute("esp32ReadDigitalPin", &json!({"PIN": "0"}))
                .unwrap(),
            BlockOutput::Boolean(true)
        );
        assert_eq!(
            dev.execute("esp32ReadTouchPin", &json!({"PIN": "27"}))
                .unwrap(),
            BlockOutput::Number(88.0)
        );
    }

    #[test]
    fn test_execute_unknown_opcode() {
        let err = device(MockPeripheral::new())
            .execute("esp32Launch", &json!({}))
            .unwrap_err();
        assert!(matches!(err, BlocksError::UnknownOpcode(_)));
    }

    #[test]
    fn test_execute_upload_only_never_touches_peripheral() {
        // no expectations: any peripheral call would panic
        let dev = device(MockPeripheral::new());
        for opcode in ["esp32AttachInterrupt", "consolePrint", "consoleInput"] {
            let err = dev.execute(opcode, &json!({})).unwrap_err();
            assert!(matches!(err, BlocksError::UploadOnly(ref op) if op == opcode));
        }
    }

    #[test]
    fn test_execute_bad_argument_never_touches_peripheral() {
        let dev = device(MockPeripheral::new());
        let err = dev
            .execute("esp32SetPwmOutput", &json!({"PIN": "2", "OUT": 5000}))
            .unwrap_err();
        assert!(matches!(err, BlocksError::InvalidArgument { .. }));
        assert!(dev
            .execute("esp32SetDigitalOutput", &json!({"PIN": "2"}))
            .is_err());
    }

    #[test]
    fn test_block_output_serialization() {
        assert_eq!(serde_json::to_value(BlockOutput::Done).unwrap(), json!(null));
        assert_eq!(
            serde_json::to_value(BlockOutput::Boolean(true)).unwrap(),
            json!(true)
        );
        assert_eq!(
            serde_json::to_value(BlockOutput::Number(3.5)).unwrap(),
            json!(3.5)
        );
    }
}
