//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use trove_commerce::StoreClient;
use trove_observability::{ClientLogger, SessionId, TracingSink};

use crate::config::{CliConfig, API_BASE_ENV, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the config was loaded from, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config_file(&cwd) {
                Some(path) => (CliConfig::load(&path.to_string_lossy())?, Some(path)),
                None => (CliConfig::default(), None),
            }
        };
        let config = config.with_api_base_override(std::env::var(API_BASE_ENV).ok());

        if let Some(path) = &config_path {
            output.debug(&format!("Using config: {}", path.display()));
        }

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
        })
    }

    /// A store client for the configured API.
    pub fn client(&self) -> Result<StoreClient> {
        StoreClient::new(self.config.store.clone()).context("Invalid store configuration")
    }

    /// Session logger forwarding to `tracing`.
    pub fn logger(&self) -> Result<ClientLogger> {
        Ok(ClientLogger::new(SessionId::generate())
            .with_min_level(self.config.output.level()?)
            .with_format(self.config.output.format()?)
            .with_sink(Arc::new(TracingSink)))
    }
}

/// Find a config file in `start` or its ancestors.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
