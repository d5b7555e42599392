//! Commerce error types.

use thiserror::Error;

use crate::ids::Sku;

/// Domain errors raised while interpreting storefront data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// None of the embedded variants carries the designated active SKU.
    #[error("Active variant {active} not present in product payload")]
    ActiveVariantMissing { active: Sku },

    /// A SKU string that is not a non-negative integer.
    #[error("Invalid SKU: {0}")]
    InvalidSku(String),

    /// A category label the catalog does not offer.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<url::ParseError> for CommerceError {
    fn from(e: url::ParseError) -> Self {
        CommerceError::Config(format!("invalid api_base: {}", e))
    }
}
