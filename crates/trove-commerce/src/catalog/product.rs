//! Catalog list items.

use serde::{Deserialize, Serialize};

use crate::ids::Sku;
use crate::money::{ApiPrice, Currency};

/// A product object as returned by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiProduct {
    pub sku_id: Sku,
    pub name: String,
    pub price: ApiPrice,
    #[serde(default)]
    pub image1_url: Option<String>,
    #[serde(default)]
    pub image2_url: Option<String>,
    #[serde(default)]
    pub image3_url: Option<String>,
    #[serde(rename = "inCart", default)]
    pub in_cart: bool,
}

/// One card in the catalog grid.
///
/// Rebuilt from the API on every fetch; never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Sku,
    pub name: String,
    /// Currency symbol followed by the API's price text, e.g. `$500`.
    pub price_label: String,
    /// Primary image URL as sent by the API (no host rewrite applied).
    pub image: Option<String>,
    pub in_cart: bool,
}

impl ProductSummary {
    pub fn from_api(product: ApiProduct, currency: Currency) -> Self {
        Self {
            id: product.sku_id,
            name: product.name,
            price_label: product.price.label(currency),
            image: product.image1_url.filter(|url| !url.is_empty()),
            in_cart: product.in_cart,
        }
    }

    /// Whether the card offers an add-to-cart action.
    pub fn can_add_to_cart(&self) -> bool {
        !self.in_cart
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_transform_is_one_to_one() {
        let api: ApiProduct = serde_json::from_value(json!({
            "sku_id": 1,
            "name": "X",
            "price": "500",
            "image1_url": "http://localhost/i.png",
            "inCart": false
        }))
        .unwrap();

        let summary = ProductSummary::from_api(api, Currency::Usd);

        assert_eq!(summary.id.to_string(), "1");
        assert_eq!(summary.name, "X");
        assert_eq!(summary.price_label, "$500");
        assert_eq!(summary.image.as_deref(), Some("http://localhost/i.png"));
        assert!(summary.can_add_to_cart());
    }

    #[test]
    fn test_missing_optional_fields() {
        let api: ApiProduct = serde_json::from_value(json!({
            "sku_id": 3,
            "name": "Pods",
            "price": 129.5,
            "extra": "ignored"
        }))
        .unwrap();

        let summary = ProductSummary::from_api(api, Currency::Usd);

        assert_eq!(summary.image, None);
        assert!(!summary.in_cart);
        assert_eq!(summary.price_label, "$129.5");
    }

    #[test]
    fn test_empty_image_is_none() {
        let api: ApiProduct = serde_json::from_value(json!({
            "sku_id": 4,
            "name": "TV",
            "price": 10,
            "image1_url": "",
            "inCart": true
        }))
        .unwrap();

        let summary = ProductSummary::from_api(api, Currency::Usd);
        assert_eq!(summary.image, None);
        assert!(!summary.can_add_to_cart());
    }
}
