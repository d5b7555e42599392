//! Cart entries and totals.

use serde::{Deserialize, Serialize};

use crate::ids::Sku;
use crate::money::{parse_label_amount, parse_price_label, ApiPrice, Currency, Money};

/// One line of the server-side cart.
///
/// Order is the server's; uniqueness by SKU is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub sku_id: Sku,
    pub name: String,
    /// Usually a formatted label such as `$10.50`, sometimes a bare number.
    pub price: ApiPrice,
    #[serde(default)]
    pub image1_url: Option<String>,
}

impl CartEntry {
    pub fn price_label(&self, currency: Currency) -> String {
        self.price.cart_label(currency)
    }

    /// Parsed price; `None` when the label is not numeric.
    pub fn amount(&self, currency: Currency) -> Option<Money> {
        parse_price_label(&self.price_label(currency), currency)
    }
}

/// Sum of every entry's parsed price, rounded to the cent once at the end.
/// Unparseable prices count as zero.
pub fn cart_total(entries: &[CartEntry], currency: Currency) -> Money {
    let sum: f64 = entries
        .iter()
        .filter_map(|e| parse_label_amount(&e.price_label(currency), currency))
        .sum();
    Money::from_decimal(sum, currency)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(sku: u64, price: serde_json::Value) -> CartEntry {
        serde_json::from_value(json!({
            "sku_id": sku,
            "name": format!("item {sku}"),
            "price": price,
            "image1_url": "http://localhost/x.png"
        }))
        .unwrap()
    }

    #[test]
    fn test_total_sums_labels() {
        let entries = vec![entry(1, json!("$10.50")), entry(2, json!("$4.25"))];
        assert_eq!(
            cart_total(&entries, Currency::Usd),
            Money::new(1475, Currency::Usd)
        );
    }

    #[test]
    fn test_total_accepts_bare_numbers() {
        let entries = vec![entry(1, json!(500)), entry(2, json!("99.99"))];
        assert_eq!(cart_total(&entries, Currency::Usd).display(), "$599.99");
    }

    #[test]
    fn test_unparseable_price_counts_zero() {
        let entries = vec![entry(1, json!("$abc")), entry(2, json!("$3"))];
        assert_eq!(cart_total(&entries, Currency::Usd).amount_cents, 300);
        assert_eq!(entries[0].amount(Currency::Usd), None);
    }

    #[test]
    fn test_total_rounds_after_summing() {
        let entries = vec![
            entry(1, json!("$0.004")),
            entry(2, json!("$0.004")),
            entry(3, json!("$0.004")),
        ];
        assert_eq!(cart_total(&entries, Currency::Usd).display(), "$0.01");
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert!(cart_total(&[], Currency::Usd).is_zero());
    }

    #[test]
    fn test_price_label_passthrough() {
        assert_eq!(entry(1, json!("$10.50")).price_label(Currency::Usd), "$10.50");
        assert_eq!(entry(1, json!(8)).price_label(Currency::Usd), "$8");
    }
}
