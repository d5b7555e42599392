//! Client configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CommerceError;
use crate::money::Currency;

/// Default API base: the host loopback as seen from an Android emulator.
pub const DEFAULT_API_BASE: &str = "http://10.0.2.2:8080";

/// Where the store lives and how its data is presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL every `/api/...` path is appended to.
    pub api_base: String,
    pub currency: Currency,
    /// Rewrite applied to image URLs before display; `None` leaves them alone.
    pub image_host: Option<HostRewrite>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            currency: Currency::Usd,
            image_host: Some(HostRewrite::default()),
        }
    }
}

impl StoreConfig {
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_image_host(mut self, rewrite: Option<HostRewrite>) -> Self {
        self.image_host = rewrite;
        self
    }

    /// Parse `api_base`, rejecting URLs that cannot carry a path.
    pub fn base_url(&self) -> Result<Url, CommerceError> {
        let url = Url::parse(self.api_base.trim())?;
        if url.cannot_be_a_base() {
            return Err(CommerceError::Config(format!(
                "api_base cannot be a base URL: {}",
                self.api_base
            )));
        }
        Ok(url)
    }

    /// `raw` with the configured host rewrite applied.
    pub fn image_url(&self, raw: &str) -> String {
        match &self.image_host {
            Some(rewrite) => rewrite.apply(raw),
            None => raw.to_string(),
        }
    }
}

/// Substring replacement of an image host, first occurrence only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostRewrite {
    pub enabled: bool,
    pub from: String,
    pub to: String,
}

impl Default for HostRewrite {
    fn default() -> Self {
        Self {
            enabled: true,
            from: "localhost".to_string(),
            to: "10.0.2.2".to_string(),
        }
    }
}

impl HostRewrite {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            enabled: true,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn apply(&self, url: &str) -> String {
        if !self.enabled || self.from.is_empty() {
            return url.to_string();
        }
        url.replacen(&self.from, &self.to, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.api_base, "http://10.0.2.2:8080");
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(
            config.image_url("http://localhost:8080/img/1.png"),
            "http://10.0.2.2:8080/img/1.png"
        );
    }

    #[test]
    fn test_rewrite_first_occurrence_only() {
        let rewrite = HostRewrite::default();
        assert_eq!(
            rewrite.apply("http://localhost/localhost.png"),
            "http://10.0.2.2/localhost.png"
        );
        assert_eq!(rewrite.apply("http://cdn.example/a.png"), "http://cdn.example/a.png");
    }

    #[test]
    fn test_rewrite_disabled() {
        let mut rewrite = HostRewrite::new("localhost", "example.com");
        rewrite.enabled = false;
        assert_eq!(rewrite.apply("http://localhost/a"), "http://localhost/a");

        let config = StoreConfig::default().with_image_host(None);
        assert_eq!(config.image_url("http://localhost/a"), "http://localhost/a");
    }

    #[test]
    fn test_base_url_validation() {
        assert!(StoreConfig::default().base_url().is_ok());
        assert!(matches!(
            StoreConfig::default().with_api_base("not a url").base_url(),
            Err(CommerceError::Config(_))
        ));
        assert!(matches!(
            StoreConfig::default().with_api_base("mailto:x@y").base_url(),
            Err(CommerceError::Config(_))
        ));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"api_base": "http://store.local"}"#).unwrap();
        assert_eq!(config.api_base, "http://store.local");
        assert_eq!(config.image_host, Some(HostRewrite::default()));
    }
}
