//! The cart screen.

use trove_commerce::cart::{cart_total, CartEntry};
use trove_commerce::{ErrorKind, Money, Sku, StoreConfig};

use crate::command::{Command, Outcome};
use crate::notice::{Notice, REMOVE_FAILED};

pub const CART_EMPTY: &str = "Your cart is empty";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartMsg {
    Remove(Sku),
    Refresh,
    DismissNotice,
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub sku: Sku,
    pub name: String,
    pub price_label: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CartScreen {
    config: StoreConfig,
    entries: Vec<CartEntry>,
    total: Money,
    loading: bool,
    error: Option<ErrorKind>,
    notice: Option<Notice>,
}

impl CartScreen {
    pub fn new(config: StoreConfig) -> Self {
        let total = Money::zero(config.currency);
        Self {
            config,
            entries: Vec::new(),
            total,
            loading: false,
            error: None,
            notice: None,
        }
    }

    pub fn mount(&mut self) -> Vec<Command> {
        self.fetch()
    }

    pub fn focus(&mut self) -> Vec<Command> {
        self.fetch()
    }

    pub fn update(&mut self, msg: CartMsg) -> Vec<Command> {
        match msg {
            CartMsg::Remove(sku) => vec![Command::RemoveFromCart(sku)],
            CartMsg::Refresh => self.fetch(),
            CartMsg::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    pub fn on_outcome(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Cart(result) => {
                self.loading = false;
                match result {
                    Ok(entries) => self.set_entries(entries),
                    Err(err) => self.error = Some(err.kind()),
                }
                Vec::new()
            }
            Outcome::RemovedFromCart { result, .. } => match result {
                Ok(outcome) if outcome.is_removed() => self.fetch(),
                Ok(_) => Vec::new(),
                Err(err) => {
                    self.notice = Some(Notice::error(REMOVE_FAILED, err.kind()));
                    Vec::new()
                }
            },
            _ => Vec::new(),
        }
    }

    fn fetch(&mut self) -> Vec<Command> {
        self.loading = true;
        vec![Command::FetchCart]
    }

    fn set_entries(&mut self, entries: Vec<CartEntry>) {
        self.total = cart_total(&entries, self.config.currency);
        self.entries = entries;
        self.error = None;
    }

    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lines(&self) -> Vec<CartLine> {
        let currency = self.config.currency;
        self.entries
            .iter()
            .map(|e| CartLine {
                sku: e.sku_id,
                name: e.name.clone(),
                price_label: e.price_label(currency),
                image: e
                    .image1_url
                    .as_deref()
                    .filter(|url| !url.is_empty())
                    .map(|url| self.config.image_url(url)),
            })
            .collect()
    }

    /// `Total: $X.XX`, only shown for a non-empty cart.
    pub fn total_text(&self) -> Option<String> {
        (!self.is_empty()).then(|| format!("Total: {}", self.total.display()))
    }

    /// The checkout button has no action; it only appears with items.
    pub fn shows_checkout(&self) -> bool {
        !self.is_empty()
    }

    pub fn empty_text(&self) -> Option<&'static str> {
        (!self.loading && self.is_empty()).then_some(CART_EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use trove_commerce::{RemoveOutcome, StoreError};

    use super::*;

    fn entry(sku: u64, price: &str) -> CartEntry {
        serde_json::from_value(json!({
            "sku_id": sku,
            "name": format!("item {sku}"),
            "price": price,
            "image1_url": "http://localhost/c.png"
        }))
        .unwrap()
    }

    fn loaded(entries: Vec<CartEntry>) -> CartScreen {
        let mut screen = CartScreen::new(StoreConfig::default());
        screen.mount();
        screen.on_outcome(Outcome::Cart(Ok(entries)));
        screen
    }

    #[test]
    fn test_mount_and_focus_fetch() {
        let mut screen = CartScreen::new(StoreConfig::default());
        assert_eq!(screen.mount(), [Command::FetchCart]);
        assert!(screen.loading());
        assert_eq!(screen.focus(), [Command::FetchCart]);
    }

    #[test]
    fn test_total_recomputed_on_change() {
        let mut screen = loaded(vec![entry(1, "$10.50"), entry(2, "$4.25")]);
        assert_eq!(screen.total_text().as_deref(), Some("Total: $14.75"));
        assert!(screen.shows_checkout());

        screen.on_outcome(Outcome::Cart(Ok(vec![entry(2, "$4.25"), entry(3, "$oops")])));
        assert_eq!(screen.total().amount_cents, 425);
    }

    #[test]
    fn test_remove_confirmed_refetches() {
        let mut screen = loaded(vec![entry(1, "$10.50")]);
        assert_eq!(
            screen.update(CartMsg::Remove(Sku::new(1))),
            [Command::RemoveFromCart(Sku::new(1))]
        );
        let commands = screen.on_outcome(Outcome::RemovedFromCart {
            sku: Sku::new(1),
            result: Ok(RemoveOutcome::Removed),
        });
        assert_eq!(commands, [Command::FetchCart]);
    }

    #[test]
    fn test_remove_other_message_does_nothing() {
        let mut screen = loaded(vec![entry(1, "$10.50")]);
        let commands = screen.on_outcome(Outcome::RemovedFromCart {
            sku: Sku::new(1),
            result: Ok(RemoveOutcome::Other("Item not in cart".to_string())),
        });
        assert!(commands.is_empty());
        assert_eq!(screen.entries().len(), 1);
        assert!(screen.notice().is_none());
    }

    #[test]
    fn test_remove_failure_raises_notice() {
        let mut screen = loaded(vec![entry(1, "$10.50")]);
        screen.on_outcome(Outcome::RemovedFromCart {
            sku: Sku::new(1),
            result: Err(StoreError::Server {
                status: 500,
                message: "boom".to_string(),
            }),
        });
        let notice = screen.notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.error, Some(ErrorKind::Server));
    }

    #[test]
    fn test_empty_cart_rendering() {
        let screen = loaded(vec![]);
        assert_eq!(screen.empty_text(), Some("Your cart is empty"));
        assert_eq!(screen.total_text(), None);
        assert!(!screen.shows_checkout());
    }

    #[test]
    fn test_lines_rewrite_images() {
        let screen = loaded(vec![entry(1, "$10.50")]);
        let lines = screen.lines();
        assert_eq!(lines[0].price_label, "$10.50");
        assert_eq!(lines[0].image.as_deref(), Some("http://10.0.2.2/c.png"));
    }

    #[test]
    fn test_read_failure_keeps_entries() {
        let mut screen = loaded(vec![entry(1, "$1")]);
        screen.focus();
        screen.on_outcome(Outcome::Cart(Err(StoreError::Network("down".to_string()))));
        assert_eq!(screen.error(), Some(ErrorKind::Network));
        assert_eq!(screen.entries().len(), 1);
        assert!(!screen.loading());
    }
}
