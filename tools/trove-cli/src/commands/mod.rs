//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod config;
pub mod favorite;
pub mod product;
pub mod shop;

use clap::{Args, Subcommand};
use trove_commerce::catalog::Category;
use trove_commerce::Sku;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Category label, e.g. "Mobile Phones" or mobile-phones.
    #[arg(short, long, default_value = "All")]
    pub category: Category,

    /// Only show products whose name contains this text.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// A single SKU argument.
#[derive(Args)]
pub struct SkuArgs {
    /// Product SKU.
    pub sku: Sku,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
