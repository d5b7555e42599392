//! Configuration management commands.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig, API_BASE_ENV};
use crate::context::{find_config_file, Context};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Get { key } => get_config(&key, ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    if std::env::var(API_BASE_ENV).is_ok() {
        ctx.output.kv("override", API_BASE_ENV);
    }

    ctx.output.info("");
    ctx.output.info("[store]");
    for key in ["api_base", "currency"] {
        ctx.output.kv(key, &ctx.config.get(&format!("store.{key}"))?);
    }

    ctx.output.info("");
    ctx.output.info("[store.image_host]");
    for key in ["enabled", "from", "to"] {
        ctx.output
            .kv(key, &ctx.config.get(&format!("store.image_host.{key}"))?);
    }

    ctx.output.info("");
    ctx.output.info("[output]");
    ctx.output.kv("log_level", &ctx.config.output.log_level);
    ctx.output.kv("log_format", &ctx.config.output.log_format);

    Ok(())
}

async fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = ctx.config.get(key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(config_path) = writable_config_path(ctx) else {
        bail!("No config file found. Run `trove config init` to create one.");
    };
    let path = config_path.to_string_lossy().to_string();

    // Edit the file as written, without the environment override.
    let mut config = CliConfig::load(&path)?;
    config.set(key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("trove.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn writable_config_path(ctx: &Context) -> Option<PathBuf> {
    ctx.config_path
        .clone()
        .or_else(|| find_config_file(&ctx.cwd))
}
