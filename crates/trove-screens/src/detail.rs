//! The product detail screen: carousel, variants and add-to-cart.

use std::time::Duration;

use trove_commerce::catalog::{ResolvedProduct, Variant};
use trove_commerce::{Sku, StoreConfig};

use crate::command::{Command, Navigation, Outcome};
use crate::notice::{Notice, ADDED_TO_CART, ADD_TO_CART_FAILED, PRODUCT_FETCH_FAILED};

/// Carousel autoplay period.
pub const AUTOPLAY_INTERVAL: Duration = Duration::from_secs(3);

pub const IMAGE_PLACEHOLDER: &str = "Image not available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailMsg {
    Next,
    Prev,
    /// Autoplay timer fired.
    Tick,
    /// An image failed to load.
    ImageFailed,
    SelectVariant(Sku),
    AddToCart,
    GoToCart,
    DismissNotice,
}

/// What one carousel slot renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    Image(String),
    Placeholder,
}

impl Slide {
    pub fn placeholder_text(&self) -> Option<&'static str> {
        matches!(self, Slide::Placeholder).then_some(IMAGE_PLACEHOLDER)
    }
}

/// A sibling variant under "Other Variants".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCard {
    pub sku: Sku,
    /// `name - $price`.
    pub label: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DetailScreen {
    config: StoreConfig,
    product: ResolvedProduct,
    images: Vec<String>,
    cache_bust: String,
    position: usize,
    image_failed: bool,
    notice: Option<Notice>,
}

impl DetailScreen {
    /// `cache_bust` is appended to every image URL as a query parameter.
    pub fn new(product: ResolvedProduct, config: StoreConfig, cache_bust: impl Into<String>) -> Self {
        let images = product
            .active
            .images()
            .into_iter()
            .map(|url| config.image_url(url))
            .collect();
        Self {
            config,
            product,
            images,
            cache_bust: cache_bust.into(),
            position: 0,
            image_failed: false,
            notice: None,
        }
    }

    /// The payload arrives with the screen; nothing to fetch.
    pub fn mount(&mut self) -> Vec<Command> {
        Vec::new()
    }

    pub fn focus(&mut self) -> Vec<Command> {
        Vec::new()
    }

    pub fn update(&mut self, msg: DetailMsg) -> Vec<Command> {
        match msg {
            DetailMsg::Next | DetailMsg::Tick => {
                self.advance(1);
                Vec::new()
            }
            DetailMsg::Prev => {
                self.advance(-1);
                Vec::new()
            }
            DetailMsg::ImageFailed => {
                self.image_failed = true;
                Vec::new()
            }
            DetailMsg::SelectVariant(sku) => vec![Command::FetchProduct(sku)],
            DetailMsg::AddToCart => vec![Command::AddToCart(self.product.active.sku_id)],
            DetailMsg::GoToCart => vec![Command::Navigate(Navigation::OpenCart)],
            DetailMsg::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    pub fn on_outcome(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Product { result, .. } => match result {
                Ok(product) => vec![Command::Navigate(Navigation::OpenProduct(Box::new(product)))],
                Err(err) => {
                    self.notice = Some(Notice::error(PRODUCT_FETCH_FAILED, err.kind()));
                    Vec::new()
                }
            },
            Outcome::AddedToCart { result, .. } => {
                self.notice = Some(match result {
                    Ok(()) => Notice::success(ADDED_TO_CART),
                    Err(err) => Notice::error(ADD_TO_CART_FAILED, err.kind()),
                });
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn advance(&mut self, step: isize) {
        let len = self.images.len();
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.position = (self.position as isize + step).rem_euclid(len) as usize;
    }

    fn busted(&self, url: &str) -> String {
        let sep = if url.contains('?') { '&' } else { '?' };
        format!("{url}{sep}cache_bust={}", self.cache_bust)
    }

    pub fn active(&self) -> &Variant {
        &self.product.active
    }

    pub fn siblings(&self) -> &[Variant] {
        &self.product.siblings
    }

    pub fn title(&self) -> &str {
        &self.product.active.name
    }

    /// `Price: $<price>`.
    pub fn price_text(&self) -> String {
        self.product.active.price_text(self.config.currency)
    }

    pub fn description(&self) -> &str {
        self.product.active.description_or_default()
    }

    /// Current carousel index.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn image_failed(&self) -> bool {
        self.image_failed
    }

    /// Every carousel slot, in order.
    pub fn slides(&self) -> Vec<Slide> {
        self.images
            .iter()
            .map(|url| {
                if self.image_failed {
                    Slide::Placeholder
                } else {
                    Slide::Image(self.busted(url))
                }
            })
            .collect()
    }

    pub fn current_slide(&self) -> Option<Slide> {
        self.slides().into_iter().nth(self.position)
    }

    pub fn other_variants(&self) -> Vec<VariantCard> {
        self.product
            .siblings
            .iter()
            .map(|v| VariantCard {
                sku: v.sku_id,
                label: format!("{} - {}", v.name, v.price.label(self.config.currency)),
                image: v
                    .primary_image()
                    .map(|url| self.busted(&self.config.image_url(url))),
            })
            .collect()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use trove_commerce::catalog::ProductDetail;
    use trove_commerce::{ErrorKind, StoreError};

    use super::*;

    fn resolved(active: u64, images: usize) -> ResolvedProduct {
        let variant = |sku: u64| {
            let mut v = json!({
                "sku_id": sku,
                "name": format!("Phone {sku}"),
                "price": 999,
                "product_id": {"description": ""}
            });
            for slot in 1..=images {
                v[format!("image{slot}_url")] = json!(format!("http://localhost/{sku}-{slot}.png"));
            }
            v
        };
        let detail: ProductDetail = serde_json::from_value(json!({
            "active_var": active,
            "var1": variant(1),
            "var2": variant(2),
            "var3": variant(3),
        }))
        .unwrap();
        detail.resolve().unwrap()
    }

    fn screen(images: usize) -> DetailScreen {
        DetailScreen::new(resolved(2, images), StoreConfig::default(), "42")
    }

    #[test]
    fn test_header_text() {
        let screen = screen(3);
        assert_eq!(screen.title(), "Phone 2");
        assert_eq!(screen.price_text(), "Price: $999");
        assert_eq!(screen.description(), "No description available.");
    }

    #[test]
    fn test_slides_rewrite_and_bust() {
        let screen = screen(2);
        assert_eq!(
            screen.slides(),
            [
                Slide::Image("http://10.0.2.2/2-1.png?cache_bust=42".to_string()),
                Slide::Image("http://10.0.2.2/2-2.png?cache_bust=42".to_string()),
            ]
        );
    }

    #[test]
    fn test_carousel_wraps_both_ways() {
        let mut screen = screen(3);
        screen.update(DetailMsg::Prev);
        assert_eq!(screen.position(), 2);
        screen.update(DetailMsg::Next);
        assert_eq!(screen.position(), 0);

        for _ in 0..4 {
            screen.update(DetailMsg::Tick);
        }
        assert_eq!(screen.position(), 1);
    }

    #[test]
    fn test_carousel_without_images() {
        let mut screen = screen(0);
        screen.update(DetailMsg::Tick);
        assert_eq!(screen.position(), 0);
        assert_eq!(screen.current_slide(), None);
    }

    #[test]
    fn test_image_failure_is_sticky() {
        let mut screen = screen(3);
        screen.update(DetailMsg::ImageFailed);
        screen.update(DetailMsg::Next);
        screen.update(DetailMsg::AddToCart);

        assert!(screen.image_failed());
        assert!(screen.slides().iter().all(|s| *s == Slide::Placeholder));
        assert_eq!(
            screen.current_slide().and_then(|s| s.placeholder_text()),
            Some("Image not available")
        );
    }

    #[test]
    fn test_other_variants() {
        let cards = screen(1).other_variants();
        let labels: Vec<_> = cards.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["Phone 1 - $999", "Phone 3 - $999"]);
        assert_eq!(
            cards[0].image.as_deref(),
            Some("http://10.0.2.2/1-1.png?cache_bust=42")
        );
    }

    #[test]
    fn test_add_to_cart_notices() {
        let mut screen = screen(1);
        assert_eq!(
            screen.update(DetailMsg::AddToCart),
            [Command::AddToCart(Sku::new(2))]
        );

        screen.on_outcome(Outcome::AddedToCart {
            sku: Sku::new(2),
            result: Ok(()),
        });
        let notice = screen.notice().unwrap();
        assert_eq!((notice.title(), notice.message.as_str()), ("Success", "Product added to cart."));

        screen.on_outcome(Outcome::AddedToCart {
            sku: Sku::new(2),
            result: Err(StoreError::Network("down".to_string())),
        });
        let notice = screen.notice().unwrap();
        assert_eq!(notice.title(), "Error");
        assert_eq!(
            notice.message,
            "Failed to add product to cart. Please try again later."
        );
    }

    #[test]
    fn test_select_variant() {
        let mut screen = screen(1);
        assert_eq!(
            screen.update(DetailMsg::SelectVariant(Sku::new(3))),
            [Command::FetchProduct(Sku::new(3))]
        );

        let next = resolved(3, 1);
        assert_eq!(
            screen.on_outcome(Outcome::Product {
                sku: Sku::new(3),
                result: Ok(next.clone()),
            }),
            [Command::Navigate(Navigation::OpenProduct(Box::new(next)))]
        );

        screen.on_outcome(Outcome::Product {
            sku: Sku::new(3),
            result: Err(StoreError::NotFound {
                resource: "/api/products/3".to_string(),
            }),
        });
        let notice = screen.notice().unwrap();
        assert_eq!(
            notice.message,
            "Failed to fetch product details. Please try again later."
        );
        assert_eq!(notice.error, Some(ErrorKind::NotFound));
    }
}
