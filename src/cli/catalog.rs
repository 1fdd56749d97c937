//! Catalog, blocks and menus command handlers.

use anyhow::{bail, Context, Result};

use esp32blocks::blocks::catalog;
use esp32blocks::config::Config;
use esp32blocks::log_component;

/// Print the localised catalog JSON.
pub(crate) fn cmd_catalog(mut config: Config, pretty: bool, locale: Option<String>) -> Result<()> {
    if let Some(locale) = locale {
        config.locale.language = locale;
    }
    let localizer = config
        .localizer()
        .context("Failed to load translations")?;
    let info = catalog::get_info(localizer.as_ref()).context("Catalog is inconsistent")?;
    log_component!(
        debug,
        "cli",
        "catalog built",
        locale = config.locale.language.as_str(),
        categories = info.len()
    );

    let json = if pretty {
        serde_json::to_string_pretty(&info)?
    } else {
        serde_json::to_string(&info)?
    };
    println!("{}", json);
    Ok(())
}

/// Print one line per block.
pub(crate) fn cmd_blocks(config: &Config) -> Result<()> {
    let localizer = config
        .localizer()
        .context("Failed to load translations")?;
    let info = catalog::get_info(localizer.as_ref()).context("Catalog is inconsistent")?;

    for category in &info {
        println!("{} ({})", category.name, category.id);
        for block in category.blocks() {
            let modes = if block.program_mode.is_empty() {
                "any".to_string()
            } else {
                block
                    .program_mode
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            };
            println!(
                "  {:<24} {:<9} {:<8} {}",
                block.opcode, block.block_type, modes, block.text
            );
        }
        println!();
    }
    Ok(())
}

/// List menu names, or the items of `name`.
pub(crate) fn cmd_menus(config: &Config, name: Option<String>) -> Result<()> {
    let localizer = config
        .localizer()
        .context("Failed to load translations")?;
    let info = catalog::get_info(localizer.as_ref()).context("Catalog is inconsistent")?;

    match name {
        None => {
            for category in &info {
                for menu in &category.menus {
                    let reporters = if menu.accept_reporters {
                        " (accepts reporters)"
                    } else {
                        ""
                    };
                    println!(
                        "{:<14} {:>3} items{}",
                        menu.name,
                        menu.items.len(),
                        reporters
                    );
                }
            }
        }
        Some(name) => {
            let Some(menu) = info.iter().find_map(|c| c.menu(&name)) else {
                bail!("Unknown menu '{}'. Try: esp32blocks menus", name);
            };
            for item in &menu.items {
                println!("{:<8} {}", item.value, item.text);
            }
        }
    }
    Ok(())
}
