//! Device profile command handler.

use anyhow::Result;
use serde_json::json;

use esp32blocks::blocks::Pin;
use esp32blocks::config::Config;
use esp32blocks::peripherals::board_profile::ESP32_PROFILE;
use esp32blocks::peripherals::esp32::PeripheralProfile;
use esp32blocks::Esp32Device;

fn capabilities(pin: Pin) -> String {
    let profile = &ESP32_PROFILE;
    [
        (profile.is_valid_output(pin), "out"),
        (profile.is_valid_adc(pin), "adc"),
        (profile.is_valid_dac(pin), "dac"),
        (profile.is_valid_touch(pin), "touch"),
    ]
    .iter()
    .filter(|(has, _)| *has)
    .map(|(_, name)| *name)
    .collect::<Vec<_>>()
    .join(",")
}

/// Show how the board is identified, connected and flashed.
pub(crate) fn cmd_device(config: &Config, as_json: bool) -> Result<()> {
    let profile = PeripheralProfile::esp32(Esp32Device::DEVICE_ID, &config.device.original_id);

    if as_json {
        let out = json!({
            "profile": profile,
            "port": config.device.port,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Device: {}", profile.device_id);
    println!("  Original id   {}", profile.original_device_id);
    println!(
        "  Port          {}",
        config.device.port.as_deref().unwrap_or("(not configured)")
    );
    let filters = profile
        .usb_filters
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("  USB filters   {}", filters);
    println!(
        "  Serial        {} baud, {} data bits, {} stop bit",
        profile.serial.baud_rate, profile.serial.data_bits, profile.serial.stop_bits
    );
    println!(
        "  Firmware      {} ({} on {}, {} baud)",
        profile.firmware.firmware,
        profile.firmware.kind,
        profile.firmware.chip,
        profile.firmware.baud
    );
    println!();
    println!("Pins ({}):", ESP32_PROFILE.name);
    for &pin in ESP32_PROFILE.gpio_pins {
        let caps = capabilities(pin);
        let caps = if caps.is_empty() { "in only" } else { caps.as_str() };
        println!("  {:<6} {}", pin.label(), caps);
    }
    Ok(())
}
