//! CLI configuration.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use trove_commerce::{Currency, HostRewrite, StoreConfig};
use trove_observability::{LogFormat, LogLevel};

/// Environment variable that overrides `store.api_base`.
pub const API_BASE_ENV: &str = "TROVE_API_BASE";

/// Names searched for, in order, in each directory up from the cwd.
pub const CONFIG_NAMES: [&str; 3] = ["trove.toml", ".trove.toml", "trove.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Store API settings.
    #[serde(default)]
    pub store: StoreConfig,

    /// Log output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse `content` as JSON or TOML depending on `path`'s extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content).with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Apply an `api_base` override (usually from [`API_BASE_ENV`]).
    pub fn with_api_base_override(mut self, api_base: Option<String>) -> Self {
        if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
            self.store.api_base = base;
        }
        self
    }

    /// Read a dotted key.
    pub fn get(&self, key: &str) -> Result<String> {
        let parts: Vec<&str> = key.split('.').collect();
        let rewrite = self.store.image_host.clone().unwrap_or_default();

        match parts.as_slice() {
            ["store", "api_base"] => Ok(self.store.api_base.clone()),
            ["store", "currency"] => Ok(self.store.currency.code().to_string()),
            ["store", "image_host", "enabled"] => {
                Ok((self.store.image_host.is_some() && rewrite.enabled).to_string())
            }
            ["store", "image_host", "from"] => Ok(rewrite.from),
            ["store", "image_host", "to"] => Ok(rewrite.to),
            ["output", "log_level"] => Ok(self.output.log_level.clone()),
            ["output", "log_format"] => Ok(self.output.log_format.clone()),
            _ => bail!("Unknown config key: {}", key),
        }
    }

    /// Write a dotted key, validating the value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["store", "api_base"] => {
                let candidate = self.store.clone().with_api_base(value);
                candidate.base_url()?;
                self.store = candidate;
            }
            ["store", "currency"] => {
                self.store.currency = Currency::from_code(value)
                    .with_context(|| format!("Unsupported currency: {}", value))?;
            }
            ["store", "image_host", field] => {
                let rewrite = self.store.image_host.get_or_insert_with(HostRewrite::default);
                match *field {
                    "enabled" => rewrite.enabled = value.parse()?,
                    "from" => rewrite.from = value.to_string(),
                    "to" => rewrite.to = value.to_string(),
                    _ => bail!("Unknown config key: {}", key),
                }
            }
            ["output", "log_level"] => {
                parse_level(value)?;
                self.output.log_level = value.to_lowercase();
            }
            ["output", "log_format"] => {
                parse_format(value)?;
                self.output.log_format = value.to_lowercase();
            }
            _ => bail!("Unknown or read-only config key: {}", key),
        }

        Ok(())
    }
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Minimum client log level: trace, debug, info, warn or error.
    pub log_level: String,

    /// `human` or `json`.
    pub log_format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "human".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn level(&self) -> Result<LogLevel> {
        parse_level(&self.log_level)
    }

    pub fn format(&self) -> Result<LogFormat> {
        parse_format(&self.log_format)
    }
}

fn parse_level(value: &str) -> Result<LogLevel> {
    Ok(match value.to_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        "error" => LogLevel::Error,
        other => bail!("Unknown log level: {}", other),
    })
}

fn parse_format(value: &str) -> Result<LogFormat> {
    Ok(match value.to_lowercase().as_str() {
        "human" => LogFormat::Human,
        "json" => LogFormat::Json,
        other => bail!("Unknown log format: {}", other),
    })
}

/// Generate the default `trove.toml`.
pub fn generate_default_config() -> String {
    r#"# TechnoTrove storefront configuration

[store]
api_base = "http://10.0.2.2:8080"
currency = "USD"

# Image URLs from the API point at the server's own host name.
[store.image_host]
enabled = true
from = "localhost"
to = "10.0.2.2"

[output]
log_level = "info"
log_format = "human"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = CliConfig::parse("trove.toml", &generate_default_config()).unwrap();
        assert_eq!(config.store, StoreConfig::default());
        assert_eq!(config.output.level().unwrap(), LogLevel::Info);
        assert_eq!(config.output.format().unwrap(), LogFormat::Human);
    }

    #[test]
    fn test_json_config() {
        let config =
            CliConfig::parse("trove.json", r#"{"store": {"api_base": "http://shop.local"}}"#)
                .unwrap();
        assert_eq!(config.store.api_base, "http://shop.local");
        assert_eq!(config.store.image_host, Some(HostRewrite::default()));
    }

    #[test]
    fn test_env_override() {
        let config = CliConfig::default().with_api_base_override(Some("http://x:1".to_string()));
        assert_eq!(config.store.api_base, "http://x:1");

        let config = CliConfig::default().with_api_base_override(Some("  ".to_string()));
        assert_eq!(config.store.api_base, "http://10.0.2.2:8080");
    }

    #[test]
    fn test_get_and_set() {
        let mut config = CliConfig::default();
        config.set("store.image_host.enabled", "false").unwrap();
        config.set("store.currency", "eur").unwrap();
        config.set("output.log_format", "JSON").unwrap();

        assert_eq!(config.get("store.image_host.enabled").unwrap(), "false");
        assert_eq!(config.get("store.currency").unwrap(), "EUR");
        assert_eq!(config.get("output.log_format").unwrap(), "json");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CliConfig::default();
        assert!(config.set("store.api_base", "not a url").is_err());
        assert!(config.set("store.currency", "JPY").is_err());
        assert!(config.set("output.log_level", "loud").is_err());
        assert!(config.set("store.nope", "1").is_err());
        assert_eq!(config.store.api_base, "http://10.0.2.2:8080");
    }
}
