//! Catalog types shared by the block tables and the host-facing metadata.
//!
//! Two layers live here. The `*Spec` types are `const`-constructible static
//! descriptions holding untranslated [`Message`]s. The `*Info` types are what
//! [`get_info`](super::catalog::get_info) hands to the host: localised and
//! serialised in the editor's JSON shape (camelCase keys, arguments and menus
//! as objects in declaration order, separators as `"---"`).

use std::fmt;
use std::str::FromStr;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::error::BlocksError;
use crate::i18n::Message;

// ---------------------------------------------------------------------------
// Enumerations understood by the host
// ---------------------------------------------------------------------------

/// Primitive type of a block argument slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArgumentType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "number")]
    Number,
    /// Integer in `0..=255`.
    #[serde(rename = "uint8_number")]
    Uint8Number,
    /// Integer in `0..=1023`.
    #[serde(rename = "uint10_number")]
    Uint10Number,
    #[serde(rename = "angle")]
    Angle,
    #[serde(rename = "Boolean")]
    Boolean,
}

/// Shape of a block in the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlockType {
    #[serde(rename = "command")]
    Command,
    #[serde(rename = "Boolean")]
    Boolean,
    #[serde(rename = "reporter")]
    Reporter,
    /// C-shaped block with a nested body.
    #[serde(rename = "conditional")]
    Conditional,
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => write!(f, "command"),
            Self::Boolean => write!(f, "boolean"),
            Self::Reporter => write!(f, "reporter"),
            Self::Conditional => write!(f, "conditional"),
        }
    }
}

/// Where a block can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramMode {
    /// Executed live against a connected board.
    Realtime,
    /// Only emitted into generated firmware.
    Upload,
}

impl fmt::Display for ProgramMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Realtime => write!(f, "realtime"),
            Self::Upload => write!(f, "upload"),
        }
    }
}

/// Every operation this device declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    InitPinMode,
    SetDigitalOutput,
    SetPwmOutput,
    SetDacOutput,
    ReadDigitalPin,
    ReadAnalogPin,
    ReadTouchPin,
    SetServoOutput,
    AttachInterrupt,
    ConsolePrint,
    ConsoleInput,
}

impl Opcode {
    pub const ALL: [Opcode; 11] = [
        Opcode::InitPinMode,
        Opcode::SetDigitalOutput,
        Opcode::SetPwmOutput,
        Opcode::SetDacOutput,
        Opcode::ReadDigitalPin,
        Opcode::ReadAnalogPin,
        Opcode::ReadTouchPin,
        Opcode::SetServoOutput,
        Opcode::AttachInterrupt,
        Opcode::ConsolePrint,
        Opcode::ConsoleInput,
    ];

    /// The opcode string the host stores in projects.
    pub fn as_str(self) -> &'static str {
        match self {
            Opcode::InitPinMode => "esp32InitPinMode",
            Opcode::SetDigitalOutput => "esp32SetDigitalOutput",
            Opcode::SetPwmOutput => "esp32SetPwmOutput",
            Opcode::SetDacOutput => "esp32SetDACOutput",
            Opcode::ReadDigitalPin => "esp32ReadDigitalPin",
            Opcode::ReadAnalogPin => "esp32ReadAnalogPin",
            Opcode::ReadTouchPin => "esp32ReadTouchPin",
            Opcode::SetServoOutput => "esp32SetServoOutput",
            Opcode::AttachInterrupt => "esp32AttachInterrupt",
            Opcode::ConsolePrint => "consolePrint",
            Opcode::ConsoleInput => "consoleInput",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Opcode {
    type Err = BlocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| BlocksError::UnknownOpcode(s.to_string()))
    }
}

impl Serialize for Opcode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Static descriptions
// ---------------------------------------------------------------------------

/// One named argument slot of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    /// Placeholder name used in the block text, e.g. `PIN` for `[PIN]`.
    pub name: &'static str,
    pub arg_type: ArgumentType,
    /// Name of the menu constraining this slot, if any.
    pub menu: Option<&'static str>,
    pub default_value: &'static str,
}

/// Static description of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub opcode: Opcode,
    pub text: Message,
    pub block_type: BlockType,
    pub arguments: &'static [ArgumentSpec],
    /// Empty means the block works in every program mode.
    pub program_mode: &'static [ProgramMode],
}

impl BlockSpec {
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Whether the block may run live against a connected board.
    pub fn runs_in_realtime(&self) -> bool {
        self.program_mode.is_empty() || self.program_mode.contains(&ProgramMode::Realtime)
    }
}

/// Position in a category's block list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySpec {
    Block(&'static BlockSpec),
    Separator,
}

/// Text of a menu item: either fixed (pin labels) or translatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemText {
    Literal(&'static str),
    Localized(Message),
}

/// One selectable item of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItemSpec {
    pub text: ItemText,
    pub value: &'static str,
}

/// A named menu, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSpec {
    pub name: &'static str,
    /// Whether reporter blocks may be dropped into slots bound to this menu.
    pub accept_reporters: bool,
    pub items: Vec<MenuItemSpec>,
}

impl MenuSpec {
    pub fn values(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.items.iter().map(|i| i.value)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.items.iter().any(|i| i.value == value)
    }
}

/// Static description of a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub id: &'static str,
    pub name: Message,
    pub colors: [&'static str; 3],
    pub entries: &'static [EntrySpec],
    /// Names of the menus this category ships with.
    pub menus: &'static [&'static str],
}

// ---------------------------------------------------------------------------
// Host-facing metadata
// ---------------------------------------------------------------------------

/// Localised argument slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentInfo {
    pub name: &'static str,
    pub arg_type: ArgumentType,
    pub menu: Option<&'static str>,
    pub default_value: String,
}

/// Localised block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockInfo {
    pub opcode: Opcode,
    pub text: String,
    pub block_type: BlockType,
    pub arguments: Vec<ArgumentInfo>,
    pub program_mode: Vec<ProgramMode>,
}

/// Block or `"---"` separator.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogEntry {
    Block(BlockInfo),
    Separator,
}

impl CatalogEntry {
    pub fn as_block(&self) -> Option<&BlockInfo> {
        match self {
            CatalogEntry::Block(block) => Some(block),
            CatalogEntry::Separator => None,
        }
    }
}

/// Localised menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub text: String,
    pub value: &'static str,
}

/// Localised menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuInfo {
    pub name: &'static str,
    pub accept_reporters: bool,
    pub items: Vec<MenuItem>,
}

/// Localised category, the top-level element of the host metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: &'static str,
    pub name: String,
    pub colors: [&'static str; 3],
    pub blocks: Vec<CatalogEntry>,
    pub menus: Vec<MenuInfo>,
}

impl Category {
    pub fn blocks(&self) -> impl Iterator<Item = &BlockInfo> {
        self.blocks.iter().filter_map(CatalogEntry::as_block)
    }

    pub fn menu(&self, name: &str) -> Option<&MenuInfo> {
        self.menus.iter().find(|m| m.name == name)
    }
}

// Serialization to the editor's extension-info JSON. Arguments and menus are
// objects keyed by name, so they are written by hand to keep declaration order.

struct ArgumentMap<'a>(&'a [ArgumentInfo]);

impl Serialize for ArgumentMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for arg in self.0 {
            map.serialize_entry(arg.name, &ArgumentBody(arg))?;
        }
        map.end()
    }
}

struct ArgumentBody<'a>(&'a ArgumentInfo);

impl Serialize for ArgumentBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let arg = self.0;
        let len = if arg.menu.is_some() { 3 } else { 2 };
        let mut s = serializer.serialize_struct("Argument", len)?;
        s.serialize_field("type", &arg.arg_type)?;
        if let Some(menu) = arg.menu {
            s.serialize_field("menu", menu)?;
        }
        s.serialize_field("defaultValue", &arg.default_value)?;
        s.end()
    }
}

impl Serialize for BlockInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.program_mode.is_empty() { 4 } else { 5 };
        let mut s = serializer.serialize_struct("Block", len)?;
        s.serialize_field("opcode", &self.opcode)?;
        s.serialize_field("text", &self.text)?;
        s.serialize_field("blockType", &self.block_type)?;
        s.serialize_field("arguments", &ArgumentMap(&self.arguments))?;
        if !self.program_mode.is_empty() {
            s.serialize_field("programMode", &self.program_mode)?;
        }
        s.end()
    }
}

impl Serialize for CatalogEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CatalogEntry::Block(block) => block.serialize(serializer),
            CatalogEntry::Separator => serializer.serialize_str("---"),
        }
    }
}

struct MenuBody<'a>(&'a MenuInfo);

impl Serialize for MenuBody<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let menu = self.0;
        let len = if menu.accept_reporters { 2 } else { 1 };
        let mut s = serializer.serialize_struct("Menu", len)?;
        if menu.accept_reporters {
            s.serialize_field("acceptReporters", &true)?;
        }
        s.serialize_field("items", &menu.items)?;
        s.end()
    }
}

struct MenuMap<'a>(&'a [MenuInfo]);

impl Serialize for MenuMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for menu in self.0 {
            map.serialize_entry(menu.name, &MenuBody(menu))?;
        }
        map.end()
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Category", 7)?;
        s.serialize_field("id", self.id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("color1", self.colors[0])?;
        s.serialize_field("color2", self.colors[1])?;
        s.serialize_field("color3", self.colors[2])?;
        s.serialize_field("blocks", &self.blocks)?;
        s.serialize_field("menus", &MenuMap(&self.menus))?;
        s.end()
    }
}
