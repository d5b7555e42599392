//! Money and price labels.
//!
//! The API sends prices as bare numbers (sometimes as numeric strings). The
//! client shows them as labels such as `$499.99` and totals the cart by
//! parsing those labels back. Totals are kept as integer cents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency the storefront labels prices in. The API itself is unit-less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    const TABLE: [(Currency, &'static str, &'static str); 3] = [
        (Currency::Usd, "USD", "$"),
        (Currency::Eur, "EUR", "\u{20ac}"),
        (Currency::Gbp, "GBP", "\u{00a3}"),
    ];

    fn row(self) -> (Currency, &'static str, &'static str) {
        Self::TABLE[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.row().1
    }

    /// Prefix used on every price label.
    pub fn symbol(self) -> &'static str {
        self.row().2
    }

    /// Case-insensitive ISO code lookup.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, iso, _)| iso.eq_ignore_ascii_case(code.trim()))
            .map(|(currency, _, _)| *currency)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Whole cents in one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Rounds to the nearest cent.
    ///
    /// ```
    /// use trove_commerce::money::{Currency, Money};
    /// assert_eq!(Money::from_decimal(1299.99, Currency::Usd).amount_cents, 129999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        Self::new((amount * 100.0).round() as i64, currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// `$599.99`; always two decimals.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let cents = self.amount_cents.unsigned_abs();
        write!(
            f,
            "{sign}{}{}.{:02}",
            self.currency.symbol(),
            cents / 100,
            cents % 100
        )
    }
}

/// A price exactly as the API sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiPrice {
    Number(serde_json::Number),
    Text(String),
}

impl ApiPrice {
    /// The price text as sent.
    ///
    /// Whole floats print without a fractional part (`500.0` → `500`), the
    /// way the API's JSON numbers render in a browser.
    pub fn as_text(&self) -> String {
        match self {
            ApiPrice::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                    format!("{}", f as i64)
                }
                _ => n.to_string(),
            },
            ApiPrice::Text(s) => s.clone(),
        }
    }

    /// The numeric value, if there is one.
    pub fn amount(&self) -> Option<f64> {
        match self {
            ApiPrice::Number(n) => n.as_f64(),
            ApiPrice::Text(s) => parse_amount(s),
        }
    }

    /// Catalog and detail label: the currency symbol followed by the price
    /// exactly as sent.
    pub fn label(&self, currency: Currency) -> String {
        format!("{}{}", currency.symbol(), self.as_text())
    }

    /// Cart label. The cart endpoint usually sends finished labels such as
    /// `$10.50`; those are kept, and bare numbers get the symbol.
    pub fn cart_label(&self, currency: Currency) -> String {
        let text = self.as_text();
        let text = text.trim();
        if text.starts_with(currency.symbol()) {
            text.to_string()
        } else {
            format!("{}{}", currency.symbol(), text)
        }
    }
}

impl From<f64> for ApiPrice {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map(ApiPrice::Number)
            .unwrap_or_else(|| ApiPrice::Text(value.to_string()))
    }
}

impl From<u64> for ApiPrice {
    fn from(value: u64) -> Self {
        ApiPrice::Number(value.into())
    }
}

impl From<&str> for ApiPrice {
    fn from(value: &str) -> Self {
        ApiPrice::Text(value.to_string())
    }
}

/// Parse a price label such as `$12.50` into money.
///
/// One leading currency symbol is stripped, then the longest numeric prefix
/// is read. Returns `None` when no number can be read or it is not finite.
pub fn parse_price_label(label: &str, currency: Currency) -> Option<Money> {
    parse_label_amount(label, currency).map(|amount| Money::from_decimal(amount, currency))
}

/// Unrounded value of a price label; see [`parse_price_label`].
pub fn parse_label_amount(label: &str, currency: Currency) -> Option<f64> {
    let trimmed = label.trim();
    parse_amount(trimmed.strip_prefix(currency.symbol()).unwrap_or(trimmed))
}

fn parse_amount(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        return value.is_finite().then_some(value);
    }

    // Longest leading run that still parses, e.g. "12.5 USD" -> 12.5.
    let end = text
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    (1..=end)
        .rev()
        .find_map(|cut| text[..cut].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::Usd).display(), "$49.99");
        assert_eq!(Money::new(50000, Currency::Usd).display(), "$500.00");
        assert_eq!(Money::zero(Currency::Eur).display(), "\u{20ac}0.00");
    }

    #[test]
    fn test_money_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(0.1 + 0.2, Currency::Usd).amount_cents, 30);
        assert_eq!(Money::from_decimal(1299.99, Currency::Usd).amount_cents, 129999);
    }

    #[test]
    fn test_money_display_negative() {
        assert_eq!(Money::new(-5, Currency::Usd).display(), "-$0.05");
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::from_code("gbp"), Some(Currency::Gbp));
        assert_eq!(Currency::from_code("JPY"), None);
        assert_eq!(Currency::Eur.to_string(), "EUR");
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
    }

    #[test]
    fn test_api_price_label_integer() {
        let price: ApiPrice = serde_json::from_str("500").unwrap();
        assert_eq!(price.label(Currency::Usd), "$500");
    }

    #[test]
    fn test_api_price_label_string() {
        let price: ApiPrice = serde_json::from_str("\"500\"").unwrap();
        assert_eq!(price.label(Currency::Usd), "$500");
        assert_eq!(price.amount(), Some(500.0));
    }

    #[test]
    fn test_api_price_label_keeps_decimals_verbatim() {
        let price: ApiPrice = serde_json::from_str("499.99").unwrap();
        assert_eq!(price.label(Currency::Usd), "$499.99");
        let whole: ApiPrice = serde_json::from_str("500.0").unwrap();
        assert_eq!(whole.label(Currency::Usd), "$500");
    }

    #[test]
    fn test_catalog_label_prefixes_text_as_sent() {
        let price = ApiPrice::from("$10.50");
        assert_eq!(price.label(Currency::Usd), "$$10.50");
        assert_eq!(ApiPrice::from("12 ").label(Currency::Usd), "$12 ");
    }

    #[test]
    fn test_cart_label_keeps_finished_labels() {
        assert_eq!(ApiPrice::from(" $10.50").cart_label(Currency::Usd), "$10.50");
        assert_eq!(ApiPrice::from(8u64).cart_label(Currency::Usd), "$8");
    }

    #[test]
    fn test_parse_label_amount_is_unrounded() {
        assert_eq!(parse_label_amount("$0.004", Currency::Usd), Some(0.004));
        assert_eq!(
            parse_price_label("$0.004", Currency::Usd),
            Some(Money::zero(Currency::Usd))
        );
    }

    #[test]
    fn test_parse_price_label() {
        assert_eq!(
            parse_price_label("$12.50", Currency::Usd),
            Some(Money::new(1250, Currency::Usd))
        );
        assert_eq!(
            parse_price_label("7", Currency::Usd),
            Some(Money::new(700, Currency::Usd))
        );
        assert_eq!(
            parse_price_label("$12.5 each", Currency::Usd),
            Some(Money::new(1250, Currency::Usd))
        );
    }

    #[test]
    fn test_parse_price_label_rejects_non_numeric() {
        assert_eq!(parse_price_label("$", Currency::Usd), None);
        assert_eq!(parse_price_label("free", Currency::Usd), None);
        assert_eq!(parse_price_label("$NaN", Currency::Usd), None);
        assert_eq!(parse_price_label("", Currency::Usd), None);
    }
}
