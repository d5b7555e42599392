//! Product detail payloads and variant resolution.

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::Sku;
use crate::money::{ApiPrice, Currency};

/// The owning product, shared by sibling variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductRef {
    #[serde(default)]
    pub description: Option<String>,
}

/// One purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub sku_id: Sku,
    pub name: String,
    pub price: ApiPrice,
    #[serde(default)]
    pub image1_url: Option<String>,
    #[serde(default)]
    pub image2_url: Option<String>,
    #[serde(default)]
    pub image3_url: Option<String>,
    #[serde(default)]
    pub product_id: ProductRef,
}

impl Variant {
    /// Present, non-empty image URLs in slot order.
    pub fn images(&self) -> Vec<&str> {
        [&self.image1_url, &self.image2_url, &self.image3_url]
            .into_iter()
            .filter_map(|url| url.as_deref())
            .filter(|url| !url.is_empty())
            .collect()
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images().into_iter().next()
    }

    /// `Price: $<price>` text for the detail header.
    pub fn price_text(&self, currency: Currency) -> String {
        format!("Price: {}", self.price.label(currency))
    }

    /// Description, or the placeholder when the product has none.
    pub fn description_or_default(&self) -> &str {
        match self.product_id.description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => "No description available.",
        }
    }
}

/// Full detail for a SKU: the active variant and up to two siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub active_var: Sku,
    pub var1: Variant,
    #[serde(default)]
    pub var2: Option<Variant>,
    #[serde(default)]
    pub var3: Option<Variant>,
}

impl ProductDetail {
    /// Variants present in the payload, in `var1..var3` order.
    pub fn variants(&self) -> Vec<&Variant> {
        std::iter::once(&self.var1)
            .chain(self.var2.as_ref())
            .chain(self.var3.as_ref())
            .collect()
    }

    /// Split into the active variant and the others (in `var1..var3` order).
    pub fn resolve(&self) -> Result<ResolvedProduct, CommerceError> {
        let active = self
            .variants()
            .into_iter()
            .find(|v| v.sku_id == self.active_var)
            .cloned()
            .ok_or(CommerceError::ActiveVariantMissing {
                active: self.active_var,
            })?;

        let siblings = self
            .variants()
            .into_iter()
            .filter(|v| v.sku_id != active.sku_id)
            .cloned()
            .collect();

        Ok(ResolvedProduct { active, siblings })
    }
}

/// A detail payload after locating the active variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProduct {
    pub active: Variant,
    pub siblings: Vec<Variant>,
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn variant(sku: u64, name: &str) -> Value {
        json!({
            "sku_id": sku,
            "name": name,
            "price": 999,
            "image1_url": format!("http://localhost/{sku}-1.png"),
            "image2_url": format!("http://localhost/{sku}-2.png"),
            "image3_url": null,
            "product_id": {"description": "A phone."}
        })
    }

    fn detail(active: u64) -> ProductDetail {
        serde_json::from_value(json!({
            "active_var": active,
            "var1": variant(10, "Black"),
            "var2": variant(11, "White"),
            "var3": variant(12, "Blue"),
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve_active_and_siblings() {
        let resolved = detail(11).resolve().unwrap();

        assert_eq!(resolved.active.name, "White");
        let siblings: Vec<_> = resolved.siblings.iter().map(|v| v.sku_id.get()).collect();
        assert_eq!(siblings, [10, 12]);
    }

    #[test]
    fn test_resolve_missing_active_is_error() {
        let err = detail(99).resolve().unwrap_err();
        assert_eq!(
            err,
            CommerceError::ActiveVariantMissing {
                active: Sku::new(99)
            }
        );
    }

    #[test]
    fn test_two_variant_payload() {
        for var3 in [json!({"var3": null}), json!({})] {
            let mut payload = json!({
                "active_var": 11,
                "var1": variant(10, "Black"),
                "var2": variant(11, "White"),
            });
            if let (Some(obj), Some(extra)) = (payload.as_object_mut(), var3.as_object()) {
                obj.extend(extra.clone());
            }
            let detail: ProductDetail = serde_json::from_value(payload).unwrap();
            assert_eq!(detail.variants().len(), 2);

            let resolved = detail.resolve().unwrap();
            assert_eq!(resolved.active.name, "White");
            assert_eq!(resolved.siblings.len(), 1);
            assert_eq!(resolved.siblings[0].name, "Black");
        }
    }

    #[test]
    fn test_single_variant_has_no_siblings() {
        let detail: ProductDetail =
            serde_json::from_value(json!({"active_var": 10, "var1": variant(10, "Black")})).unwrap();
        assert!(detail.resolve().unwrap().siblings.is_empty());
    }

    #[test]
    fn test_images_skip_missing_slots() {
        let resolved = detail(10).resolve().unwrap();
        assert_eq!(
            resolved.active.images(),
            ["http://localhost/10-1.png", "http://localhost/10-2.png"]
        );
        assert_eq!(
            resolved.active.primary_image(),
            Some("http://localhost/10-1.png")
        );
    }

    #[test]
    fn test_price_and_description_text() {
        let resolved = detail(10).resolve().unwrap();
        assert_eq!(resolved.active.price_text(Currency::Usd), "Price: $999");
        assert_eq!(resolved.active.description_or_default(), "A phone.");
    }

    #[test]
    fn test_description_fallback() {
        let mut v: Variant = serde_json::from_value(variant(1, "A")).unwrap();
        v.product_id.description = Some("  ".to_string());
        assert_eq!(v.description_or_default(), "No description available.");
        v.product_id = ProductRef::default();
        assert_eq!(v.description_or_default(), "No description available.");
    }
}
