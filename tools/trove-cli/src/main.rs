//! Trove CLI - Command line storefront for TechnoTrove.
//!
//! Commands:
//! - `trove browse` - List products in a category
//! - `trove product` - Show a product with its variants
//! - `trove cart` - Show the cart and its total
//! - `trove cart-add` / `trove cart-remove` - Change the cart
//! - `trove favorite` - Toggle a product's favorite flag
//! - `trove categories` - List the catalog categories
//! - `trove shop` - Interactive storefront
//! - `trove config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{BrowseArgs, ConfigArgs, SkuArgs};

/// Trove CLI - Browse and shop the TechnoTrove store
#[derive(Parser)]
#[command(name = "trove")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products in a category
    Browse(BrowseArgs),

    /// Show a product, its price, description and other variants
    Product(SkuArgs),

    /// Show the cart
    Cart,

    /// Add a product to the cart
    CartAdd(SkuArgs),

    /// Remove a product from the cart
    CartRemove(SkuArgs),

    /// Toggle a product's favorite flag
    Favorite(SkuArgs),

    /// List catalog categories
    Categories,

    /// Interactive storefront
    Shop,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart => commands::cart::show(&ctx).await,
        Commands::CartAdd(args) => commands::cart::add(args, &ctx).await,
        Commands::CartRemove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Favorite(args) => commands::favorite::run(args, &ctx).await,
        Commands::Categories => commands::browse::categories(&ctx).await,
        Commands::Shop => commands::shop::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Route `tracing` output to stderr. `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
