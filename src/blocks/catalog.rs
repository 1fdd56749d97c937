//! The block catalog of the MicroPython ESP32 device.
//!
//! Two categories, `pin` and `console`. Block descriptions are `const` tables;
//! [`get_info`] localises them together with the menus into the metadata the
//! editor and code generator consume.

use super::menus::{
    self, ANALOG_PINS, DAC_PINS, EOL, INTERRUPT_MODE, LEVEL, MODE, OUT_PINS, PINS, TOUCH_PINS,
};
use super::types::{
    ArgumentInfo, ArgumentSpec, ArgumentType, BlockInfo, BlockSpec, BlockType, CatalogEntry,
    Category, CategorySpec, EntrySpec, ItemText, MenuInfo, MenuItem, Opcode, ProgramMode,
};
use crate::error::{BlocksError, Result};
use crate::i18n::{Localizer, Message};

const UPLOAD_ONLY: &[ProgramMode] = &[ProgramMode::Upload];

const fn menu_arg(
    name: &'static str,
    menu: &'static str,
    default_value: &'static str,
) -> ArgumentSpec {
    ArgumentSpec {
        name,
        arg_type: ArgumentType::String,
        menu: Some(menu),
        default_value,
    }
}

const fn value_arg(
    name: &'static str,
    arg_type: ArgumentType,
    default_value: &'static str,
) -> ArgumentSpec {
    ArgumentSpec {
        name,
        arg_type,
        menu: None,
        default_value,
    }
}

// ---------------------------------------------------------------------------
// Pin blocks
// ---------------------------------------------------------------------------

pub const INIT_PIN_MODE: BlockSpec = BlockSpec {
    opcode: Opcode::InitPinMode,
    text: Message::new(
        "microPythonEsp32.pins.esp32InitPinMode",
        "set pin [PIN] mode [MODE]",
        "microPythonEsp32 set pin mode",
    ),
    block_type: BlockType::Command,
    arguments: &[menu_arg("PIN", OUT_PINS, "2"), menu_arg("MODE", MODE, "IN")],
    program_mode: &[],
};

pub const SET_DIGITAL_OUTPUT: BlockSpec = BlockSpec {
    opcode: Opcode::SetDigitalOutput,
    text: Message::new(
        "microPythonEsp32.pins.esp32SetDigitalOutput",
        "set digital pin [PIN] out [LEVEL]",
        "microPythonEsp32 set digital pin out",
    ),
    block_type: BlockType::Command,
    arguments: &[menu_arg("PIN", OUT_PINS, "2"), menu_arg("LEVEL", LEVEL, "1")],
    program_mode: &[],
};

pub const SET_PWM_OUTPUT: BlockSpec = BlockSpec {
    opcode: Opcode::SetPwmOutput,
    text: Message::new(
        "microPythonEsp32.pins.esp32SetPwmOutput",
        "set pwm pin [PIN] out [OUT]",
        "microPythonEsp32 set pwm pin out",
    ),
    block_type: BlockType::Command,
    arguments: &[
        menu_arg("PIN", OUT_PINS, "2"),
        value_arg("OUT", ArgumentType::Uint10Number, "0"),
    ],
    program_mode: &[],
};

pub const SET_DAC_OUTPUT: BlockSpec = BlockSpec {
    opcode: Opcode::SetDacOutput,
    text: Message::new(
        "microPythonEsp32.pins.esp32SetDACOutput",
        "set dac pin [PIN] out [OUT]",
        "microPythonEsp32 set dac pin out",
    ),
    block_type: BlockType::Command,
    arguments: &[
        menu_arg("PIN", DAC_PINS, "25"),
        value_arg("OUT", ArgumentType::Uint8Number, "0"),
    ],
    program_mode: &[],
};

pub const READ_DIGITAL_PIN: BlockSpec = BlockSpec {
    opcode: Opcode::ReadDigitalPin,
    text: Message::new(
        "microPythonEsp32.pins.esp32ReadDigitalPin",
        "read digital pin [PIN]",
        "microPythonEsp32 read digital pin",
    ),
    block_type: BlockType::Boolean,
    arguments: &[menu_arg("PIN", PINS, "2")],
    program_mode: &[],
};

/// Defaults to IO32, the first ADC pin. Older catalogs defaulted to IO2,
/// which is not an item of `analogPins`.
pub const READ_ANALOG_PIN: BlockSpec = BlockSpec {
    opcode: Opcode::ReadAnalogPin,
    text: Message::new(
        "microPythonEsp32.pins.esp32ReadAnalogPin",
        "read analog pin [PIN]",
        "microPythonEsp32 read analog pin",
    ),
    block_type: BlockType::Reporter,
    arguments: &[menu_arg("PIN", ANALOG_PINS, "32")],
    program_mode: &[],
};

pub const READ_TOUCH_PIN: BlockSpec = BlockSpec {
    opcode: Opcode::ReadTouchPin,
    text: Message::new(
        "microPythonEsp32.pins.esp32ReadTouchPin",
        "read touch pin [PIN]",
        "microPythonEsp32 read touch pin",
    ),
    block_type: BlockType::Reporter,
    arguments: &[menu_arg("PIN", TOUCH_PINS, "2")],
    program_mode: &[],
};

pub const SET_SERVO_OUTPUT: BlockSpec = BlockSpec {
    opcode: Opcode::SetServoOutput,
    text: Message::new(
        "microPythonEsp32.pins.setServoOutput",
        "set servo pin [PIN] out [OUT]",
        "microPythonEsp32 set servo pin out",
    ),
    block_type: BlockType::Command,
    arguments: &[
        menu_arg("PIN", OUT_PINS, "2"),
        value_arg("OUT", ArgumentType::Angle, "90"),
    ],
    program_mode: &[],
};

pub const ATTACH_INTERRUPT: BlockSpec = BlockSpec {
    opcode: Opcode::AttachInterrupt,
    text: Message::new(
        "microPythonEsp32.pins.esp32AttachInterrupt",
        "attach interrupt pin [PIN] mode [MODE] executes",
        "microPythonEsp32 attach interrupt",
    ),
    block_type: BlockType::Conditional,
    arguments: &[
        menu_arg("PIN", PINS, "2"),
        menu_arg("MODE", INTERRUPT_MODE, "RISING"),
    ],
    program_mode: UPLOAD_ONLY,
};

// ---------------------------------------------------------------------------
// Console blocks
// ---------------------------------------------------------------------------

pub const CONSOLE_PRINT: BlockSpec = BlockSpec {
    opcode: Opcode::ConsolePrint,
    text: Message::new(
        "microPythonEsp32.console.consolePrint",
        "print [TEXT] [EOL]",
        "MicrpPython console print",
    ),
    block_type: BlockType::Command,
    arguments: &[
        value_arg("TEXT", ArgumentType::String, "Hello OpenBlock"),
        menu_arg("EOL", EOL, "warp"),
    ],
    program_mode: UPLOAD_ONLY,
};

pub const CONSOLE_INPUT: BlockSpec = BlockSpec {
    opcode: Opcode::ConsoleInput,
    text: Message::new(
        "microPythonEsp32.console.consoleInput",
        "prompt [TEXT] and read input",
        "MicrpPython console input",
    ),
    block_type: BlockType::Reporter,
    arguments: &[value_arg("TEXT", ArgumentType::String, "Input a number:")],
    program_mode: UPLOAD_ONLY,
};

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub const PIN_CATEGORY: CategorySpec = CategorySpec {
    id: "pin",
    name: Message::new(
        "microPythonEsp32.category.pins",
        "Pins",
        "The name of the esp32 microPython device pin category",
    ),
    colors: ["#4C97FF", "#3373CC", "#3373CC"],
    entries: &[
        EntrySpec::Block(&INIT_PIN_MODE),
        EntrySpec::Block(&SET_DIGITAL_OUTPUT),
        EntrySpec::Block(&SET_PWM_OUTPUT),
        EntrySpec::Block(&SET_DAC_OUTPUT),
        EntrySpec::Separator,
        EntrySpec::Block(&READ_DIGITAL_PIN),
        EntrySpec::Block(&READ_ANALOG_PIN),
        EntrySpec::Block(&READ_TOUCH_PIN),
        EntrySpec::Separator,
        EntrySpec::Block(&SET_SERVO_OUTPUT),
        EntrySpec::Separator,
        EntrySpec::Block(&ATTACH_INTERRUPT),
    ],
    menus: &[
        PINS,
        OUT_PINS,
        MODE,
        LEVEL,
        DAC_PINS,
        ANALOG_PINS,
        TOUCH_PINS,
        INTERRUPT_MODE,
    ],
};

pub const CONSOLE_CATEGORY: CategorySpec = CategorySpec {
    id: "console",
    name: Message::new(
        "microPythonEsp32.category.console",
        "Console",
        "The name of the esp32 microPython device console category",
    ),
    colors: ["#FF3399", "#CC297A", "#CC297A"],
    entries: &[
        EntrySpec::Block(&CONSOLE_PRINT),
        EntrySpec::Block(&CONSOLE_INPUT),
    ],
    menus: &[EOL],
};

pub const CATEGORIES: [&CategorySpec; 2] = [&PIN_CATEGORY, &CONSOLE_CATEGORY];

/// Static description of `opcode`.
pub fn block_spec(opcode: Opcode) -> &'static BlockSpec {
    match opcode {
        Opcode::InitPinMode => &INIT_PIN_MODE,
        Opcode::SetDigitalOutput => &SET_DIGITAL_OUTPUT,
        Opcode::SetPwmOutput => &SET_PWM_OUTPUT,
        Opcode::SetDacOutput => &SET_DAC_OUTPUT,
        Opcode::ReadDigitalPin => &READ_DIGITAL_PIN,
        Opcode::ReadAnalogPin => &READ_ANALOG_PIN,
        Opcode::ReadTouchPin => &READ_TOUCH_PIN,
        Opcode::SetServoOutput => &SET_SERVO_OUTPUT,
        Opcode::AttachInterrupt => &ATTACH_INTERRUPT,
        Opcode::ConsolePrint => &CONSOLE_PRINT,
        Opcode::ConsoleInput => &CONSOLE_INPUT,
    }
}

// ---------------------------------------------------------------------------
// Localisation
// ---------------------------------------------------------------------------

fn localize_block(spec: &BlockSpec, localizer: &dyn Localizer) -> BlockInfo {
    BlockInfo {
        opcode: spec.opcode,
        text: localizer.format(&spec.text),
        block_type: spec.block_type,
        arguments: spec
            .arguments
            .iter()
            .map(|arg| ArgumentInfo {
                name: arg.name,
                arg_type: arg.arg_type,
                menu: arg.menu,
                default_value: arg.default_value.to_string(),
            })
            .collect(),
        program_mode: spec.program_mode.to_vec(),
    }
}

fn localize_menu(name: &str, localizer: &dyn Localizer) -> Result<MenuInfo> {
    let spec = menus::menu(name)
        .ok_or_else(|| BlocksError::Catalog(format!("menu '{name}' is not defined")))?;
    Ok(MenuInfo {
        name: spec.name,
        accept_reporters: spec.accept_reporters,
        items: spec
            .items
            .iter()
            .map(|item| MenuItem {
                text: match item.text {
                    ItemText::Literal(text) => text.to_string(),
                    ItemText::Localized(ref msg) => localizer.format(msg),
                },
                value: item.value,
            })
            .collect(),
    })
}

fn localize_category(spec: &CategorySpec, localizer: &dyn Localizer) -> Result<Category> {
    let blocks = spec
        .entries
        .iter()
        .map(|entry| match entry {
            EntrySpec::Block(block) => CatalogEntry::Block(localize_block(block, localizer)),
            EntrySpec::Separator => CatalogEntry::Separator,
        })
        .collect();
    let menus = spec
        .menus
        .iter()
        .map(|name| localize_menu(name, localizer))
        .collect::<Result<Vec<_>>>()?;
    Ok(Category {
        id: spec.id,
        name: localizer.format(&spec.name),
        colors: spec.colors,
        blocks,
        menus,
    })
}

/// Metadata for every category, block and menu of the device.
pub fn get_info(localizer: &dyn Localizer) -> Result<Vec<Category>> {
    let categories = CATEGORIES
        .iter()
        .map(|spec| localize_category(spec, localizer))
        .collect::<Result<Vec<_>>>()?;
    check_catalog(&categories)?;
    Ok(categories)
}

/// Verify that every menu-bound argument names a menu shipped in its own
/// category and that its default value is one of that menu's items.
pub fn check_catalog(categories: &[Category]) -> Result<()> {
    for category in categories {
        for block in category.blocks() {
            for arg in &block.arguments {
                let Some(menu_name) = arg.menu else {
                    continue;
                };
                let menu = category.menu(menu_name).ok_or_else(|| {
                    BlocksError::Catalog(format!(
                        "{}.{} references menu '{}' missing from category '{}'",
                        block.opcode, arg.name, menu_name, category.id
                    ))
                })?;
                if !menu.items.iter().any(|i| i.value == arg.default_value) {
                    return Err(BlocksError::Catalog(format!(
                        "{}.{} default '{}' is not an item of menu '{}'",
                        block.opcode, arg.name, arg.default_value, menu_name
                    )));
                }
            }
        }
    }
    Ok(())
}
