//! Block definitions: typed argument values, menus and the catalog.

pub mod catalog;
pub mod menus;
pub mod pins;
pub mod types;

pub use pins::{Eol, InterruptMode, Level, MenuValue, Pin, PinMode};
pub use types::{
    ArgumentInfo, ArgumentType, BlockInfo, BlockType, CatalogEntry, Category, MenuInfo, MenuItem,
    Opcode, ProgramMode,
};
