//! esp32blocks - Visual-programming blocks for MicroPython ESP32 boards
//!
//! The [`device::Esp32Device`] adapter publishes a block catalog to a
//! visual-programming host and forwards every block it runs to a
//! [`peripherals::Peripheral`].

pub mod blocks;
pub mod config;
pub mod device;
pub mod error;
pub mod i18n;
pub mod peripherals;
pub mod utils;

pub use config::Config;
pub use device::{BlockOutput, Esp32Device};
pub use error::{BlocksError, Result};
pub use i18n::{DefaultLocalizer, Localizer, Message, TranslationTable};
