//! Menu tables.
//!
//! Built once from [`ESP32_PROFILE`] and the typed enumerations, then shared
//! read-only for the life of the process.

use once_cell::sync::Lazy;

use super::pins::{Eol, InterruptMode, Level, MenuValue, Pin, PinMode};
use super::types::{ItemText, MenuItemSpec, MenuSpec};
use crate::i18n::Message;
use crate::peripherals::board_profile::ESP32_PROFILE;

pub const PINS: &str = "pins";
pub const OUT_PINS: &str = "outPins";
pub const MODE: &str = "mode";
pub const LEVEL: &str = "level";
pub const DAC_PINS: &str = "dacPins";
pub const ANALOG_PINS: &str = "analogPins";
pub const TOUCH_PINS: &str = "touchPins";
pub const INTERRUPT_MODE: &str = "interruptMode";
pub const EOL: &str = "eol";

pub fn pin_mode_message(mode: PinMode) -> Message {
    match mode {
        PinMode::Input => Message::new(
            "microPythonEsp32.modeMenu.input",
            "input",
            "label for input pin mode",
        ),
        PinMode::Output => Message::new(
            "microPythonEsp32.modeMenu.output",
            "output",
            "label for output pin mode",
        ),
        PinMode::InputPullup => Message::new(
            "microPythonEsp32.modeMenu.inputPullup",
            "input-pullup",
            "label for input-pullup pin mode",
        ),
        PinMode::InputPulldown => Message::new(
            "microPythonEsp32.modeMenu.inputPulldown",
            "input-pulldown",
            "label for input-pulldown pin mode",
        ),
    }
}

pub fn level_message(level: Level) -> Message {
    match level {
        Level::High => Message::new(
            "microPythonEsp32.levelMenu.high",
            "high",
            "label for high level",
        ),
        Level::Low => Message::new("microPythonEsp32.levelMenu.low", "low", "label for low level"),
    }
}

pub fn interrupt_mode_message(mode: InterruptMode) -> Message {
    match mode {
        InterruptMode::Rising => Message::new(
            "microPythonEsp32.InterrupModeMenu.risingEdge",
            "rising edge",
            "label for rising edge interrup",
        ),
        InterruptMode::Falling => Message::new(
            "microPythonEsp32.InterrupModeMenu.fallingEdge",
            "falling edge",
            "label for falling edge interrup",
        ),
        InterruptMode::Change => Message::new(
            "microPythonEsp32.InterrupModeMenu.changeEdge",
            "change edge",
            "label for change edge interrup",
        ),
        InterruptMode::LowLevel => Message::new(
            "microPythonEsp32.InterrupModeMenu.low",
            "low level",
            "label for low level interrup",
        ),
        InterruptMode::HighLevel => Message::new(
            "microPythonEsp32.InterrupModeMenu.high",
            "high level",
            "label for high level interrup",
        ),
    }
}

pub fn eol_message(eol: Eol) -> Message {
    match eol {
        Eol::Warp => Message::new("microPythonEsp32.eolMenu.warp", "warp", "label for warp print"),
        Eol::NoWarp => Message::new(
            "microPythonEsp32.eolMenu.noWarp",
            "no-warp",
            "label for no warp print",
        ),
    }
}

fn pin_menu(name: &'static str, pins: &[Pin]) -> MenuSpec {
    MenuSpec {
        name,
        accept_reporters: false,
        items: pins
            .iter()
            .map(|pin| MenuItemSpec {
                text: ItemText::Literal(pin.label()),
                value: pin.value(),
            })
            .collect(),
    }
}

fn choice_menu<T: MenuValue>(
    name: &'static str,
    accept_reporters: bool,
    choices: &[T],
    message: fn(T) -> Message,
) -> MenuSpec {
    MenuSpec {
        name,
        accept_reporters,
        items: choices
            .iter()
            .map(|choice| MenuItemSpec {
                text: ItemText::Localized(message(*choice)),
                value: choice.value(),
            })
            .collect(),
    }
}

static MENUS: Lazy<Vec<MenuSpec>> = Lazy::new(|| {
    vec![
        pin_menu(PINS, ESP32_PROFILE.gpio_pins),
        pin_menu(OUT_PINS, ESP32_PROFILE.output_pins),
        choice_menu(MODE, false, &PinMode::ALL, pin_mode_message),
        choice_menu(LEVEL, true, &Level::ALL, level_message),
        pin_menu(DAC_PINS, ESP32_PROFILE.dac_pins),
        pin_menu(ANALOG_PINS, ESP32_PROFILE.adc_pins),
        pin_menu(TOUCH_PINS, ESP32_PROFILE.touch_pins),
        choice_menu(
            INTERRUPT_MODE,
            false,
            &InterruptMode::ALL,
            interrupt_mode_message,
        ),
        choice_menu(EOL, false, &Eol::ALL, eol_message),
    ]
});

/// All menus, in the order the host lists them.
pub fn all() -> &'static [MenuSpec] {
    &MENUS
}

/// Look up a menu by name.
pub fn menu(name: &str) -> Option<&'static MenuSpec> {
    MENUS.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn values(name: &str) -> Vec<&'static str> {
        menu(name).unwrap().values().collect()
    }

    fn assert_members<T: FromStr>(name: &str) {
        for value in values(name) {
            assert!(
                value.parse::<T>().is_ok(),
                "menu {name} lists '{value}' outside its enumeration"
            );
        }
    }

    #[test]
    fn test_menu_names_unique() {
        let names: HashSet<_> = all().iter().map(|m| m.name).collect();
        assert_eq!(names.len(), all().len());
        assert_eq!(all().len(), 9);
    }

    #[test]
    fn test_no_duplicate_values() {
        for menu in all() {
            let unique: HashSet<_> = menu.values().collect();
            assert_eq!(unique.len(), menu.items.len(), "duplicates in {}", menu.name);
        }
    }

    #[test]
    fn test_values_belong_to_enumerations() {
        for name in [PINS, OUT_PINS, DAC_PINS, ANALOG_PINS, TOUCH_PINS] {
            assert_members::<Pin>(name);
        }
        assert_members::<PinMode>(MODE);
        assert_members::<Level>(LEVEL);
        assert_members::<InterruptMode>(INTERRUPT_MODE);
        assert_members::<Eol>(EOL);
    }

    #[test]
    fn test_pins_menu_order_and_labels() {
        let pins = menu(PINS).unwrap();
        assert_eq!(pins.items[0].value, "0");
        assert_eq!(pins.items[0].text, ItemText::Literal("IO0"));
        assert_eq!(pins.items[1].value, "2");
        assert_eq!(pins.items.last().unwrap().value, "39");
    }

    #[test]
    fn test_out_pins_excludes_input_only() {
        let out = menu(OUT_PINS).unwrap();
        for value in ["34", "35", "36", "39"] {
            assert!(!out.contains(value));
        }
        assert!(out.contains("33"));
    }

    #[test]
    fn test_reserved_pins_never_listed() {
        for menu in all() {
            for value in ["1", "3", "6", "7", "8", "9", "10", "11"] {
                if menu.name == MODE || menu.name == LEVEL {
                    continue;
                }
                assert!(!menu.contains(value), "{} lists reserved pin {value}", menu.name);
            }
        }
    }

    #[test]
    fn test_only_level_accepts_reporters() {
        for menu in all() {
            assert_eq!(menu.accept_reporters, menu.name == LEVEL);
        }
    }

    #[test]
    fn test_mode_menu_text() {
        let mode = menu(MODE).unwrap();
        assert_eq!(values(MODE), vec!["IN", "OUT", "PULL_UP", "PULL_DOWN"]);
        match mode.items[2].text {
            ItemText::Localized(msg) => {
                assert_eq!(msg.id, "microPythonEsp32.modeMenu.inputPullup");
                assert_eq!(msg.default, "input-pullup");
            }
            ItemText::Literal(_) => panic!("mode items are translatable"),
        }
    }

    #[test]
    fn test_dac_and_analog_menus() {
        assert_eq!(values(DAC_PINS), vec!["25", "26"]);
        assert_eq!(values(ANALOG_PINS), vec!["32", "33", "34", "35", "36", "39"]);
    }

    #[test]
    fn test_unknown_menu() {
        assert!(menu("servoPins").is_none());
    }
}
