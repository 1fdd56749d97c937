//! CLI module: command parsing and dispatch
//!
//! All CLI logic lives here. `main.rs` calls `cli::run()`.

pub mod catalog;
pub mod config;
pub mod device;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use esp32blocks::config::Config;

#[derive(Parser)]
#[command(name = "esp32blocks")]
#[command(version)]
#[command(about = "Visual-programming blocks for MicroPython ESP32 boards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the block catalog as the host's extension-info JSON
    Catalog {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
        /// Override the configured locale (e.g. "zh-cn")
        #[arg(long)]
        locale: Option<String>,
    },
    /// List blocks with their type and program mode
    Blocks,
    /// List menus, or the items of one menu
    Menus {
        /// Menu name (e.g. "pins", "analogPins")
        name: Option<String>,
    },
    /// Show the board profile: USB filters, serial settings, firmware, pins
    Device {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate config file and report issues
    Check,
}

pub async fn run() -> Result<()> {
    // Load config early so logging settings apply to every command. Logging
    // falls back to defaults on a broken file; commands that read the config
    // report the load error instead.
    let loaded = Config::load();
    let logging_cfg = loaded
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    if let Err(e) = esp32blocks::utils::logging::init_logging(&logging_cfg) {
        eprintln!("Warning: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
            println!();
        }
        Some(Commands::Version) => {
            cmd_version();
        }
        Some(Commands::Catalog { pretty, locale }) => {
            catalog::cmd_catalog(require(loaded)?, pretty, locale)?;
        }
        Some(Commands::Blocks) => {
            catalog::cmd_blocks(&require(loaded)?)?;
        }
        Some(Commands::Menus { name }) => {
            catalog::cmd_menus(&require(loaded)?, name)?;
        }
        Some(Commands::Device { json }) => {
            device::cmd_device(&require(loaded)?, json)?;
        }
        Some(Commands::Config { action }) => {
            config::cmd_config(action).await?;
        }
    }

    Ok(())
}

/// Unwrap the startup config load for commands that depend on it.
fn require(loaded: esp32blocks::Result<Config>) -> Result<Config> {
    loaded.with_context(|| format!("Failed to load config {}", Config::path().display()))
}

/// Display version information
fn cmd_version() {
    println!("esp32blocks {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Visual-programming blocks for MicroPython ESP32 boards");
}
