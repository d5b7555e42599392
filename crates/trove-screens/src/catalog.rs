//! The catalog screen: category tabs, search and the product grid.

use std::collections::HashMap;

use trove_commerce::catalog::{Category, ProductSummary};
use trove_commerce::search::SearchFilter;
use trove_commerce::{ErrorKind, Sku, StoreConfig};

use crate::command::{Command, Navigation, Outcome};
use crate::notice::{Notice, ADD_TO_CART_FAILED, FAVORITE_FAILED};

pub const NO_PRODUCTS: &str = "No products found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogMsg {
    SelectCategory(Category),
    Search(String),
    ToggleFavorite(Sku),
    AddToCart(Sku),
    OpenProduct(Sku),
    OpenCart,
    /// Re-fetch the selected category.
    Refresh,
    DismissNotice,
}

/// One card in the rendered grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: Sku,
    pub name: String,
    pub price_label: String,
    /// Display URL after the host rewrite.
    pub image: Option<String>,
    pub favorite: bool,
    pub can_add_to_cart: bool,
}

#[derive(Debug, Clone)]
pub struct CatalogScreen {
    config: StoreConfig,
    category: Category,
    products: Vec<ProductSummary>,
    search: SearchFilter,
    visible: Vec<ProductSummary>,
    favorites: HashMap<Sku, bool>,
    // Value before the optimistic flip, per in-flight toggle.
    pending_favorites: HashMap<Sku, bool>,
    ticket: u64,
    loading: bool,
    error: Option<ErrorKind>,
    notice: Option<Notice>,
}

impl CatalogScreen {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            category: Category::default(),
            products: Vec::new(),
            search: SearchFilter::default(),
            visible: Vec::new(),
            favorites: HashMap::new(),
            pending_favorites: HashMap::new(),
            ticket: 0,
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

    pub fn update(&mut self, msg: CatalogMsg) -> Vec<Command> {
        match msg {
            CatalogMsg::SelectCategory(category) => {
                if category == self.category {
                    return Vec::new();
                }
                self.category = category;
                self.fetch()
            }
            CatalogMsg::Search(query) => {
                self.search = SearchFilter::new(query);
                self.visible = self.search.apply(&self.products);
                Vec::new()
            }
            CatalogMsg::ToggleFavorite(sku) => {
                let before = self.is_favorite(sku);
                self.favorites.insert(sku, !before);
                self.pending_favorites.entry(sku).or_insert(before);
                vec![Command::ToggleFavorite(sku)]
            }
            CatalogMsg::AddToCart(sku) => {
                let in_cart = self.products.iter().any(|p| p.id == sku && p.in_cart);
                if in_cart {
                    return Vec::new();
                }
                vec![Command::AddToCart(sku)]
            }
            CatalogMsg::OpenProduct(sku) => vec![Command::FetchProduct(sku)],
            CatalogMsg::OpenCart => vec![Command::Navigate(Navigation::OpenCart)],
            CatalogMsg::Refresh => self.fetch(),
            CatalogMsg::DismissNotice => {
                self.notice = None;
                Vec::new()
            }
        }
    }

    pub fn on_outcome(&mut self, outcome: Outcome) -> Vec<Command> {
        match outcome {
            Outcome::Products { ticket, result } => {
                if ticket != self.ticket {
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(products) => {
                        self.visible = self.search.apply(&products);
                        self.products = products;
                        self.error = None;
                    }
                    Err(err) => self.error = Some(err.kind()),
                }
                Vec::new()
            }
            Outcome::Favorite { sku, result } => {
                let before = self.pending_favorites.remove(&sku);
                match result {
                    Ok(status) => {
                        if let Some(confirmed) = status.confirmed() {
                            self.favorites.insert(sku, confirmed);
                        }
                        if self.category.is_favorites() {
                            return self.fetch();
                        }
                    }
                    Err(err) => {
                        if let Some(before) = before {
                            self.favorites.insert(sku, before);
                        }
                        self.notice = Some(Notice::error(FAVORITE_FAILED, err.kind()));
                    }
                }
                Vec::new()
            }
            Outcome::AddedToCart { result, .. } => match result {
                Ok(()) => self.fetch(),
                Err(err) => {
                    self.notice = Some(Notice::error(ADD_TO_CART_FAILED, err.kind()));
                    Vec::new()
                }
            },
            Outcome::Product { result, .. } => match result {
                Ok(product) => {
                    self.error = None;
                    vec![Command::Navigate(Navigation::OpenProduct(Box::new(product)))]
                }
                Err(err) => {
                    self.error = Some(err.kind());
                    Vec::new()
                }
            },
            Outcome::Cart(_) | Outcome::RemovedFromCart { .. } => Vec::new(),
        }
    }

    fn fetch(&mut self) -> Vec<Command> {
        self.ticket += 1;
        self.loading = true;
        vec![Command::FetchProducts {
            category: self.category,
            ticket: self.ticket,
        }]
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Everything the last successful fetch returned.
    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    /// The rendered subsequence of [`Self::products`].
    pub fn visible(&self) -> &[ProductSummary] {
        &self.visible
    }

    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    /// Absent entries count as not favorite.
    pub fn is_favorite(&self, sku: Sku) -> bool {
        self.favorites.get(&sku).copied().unwrap_or(false)
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

    /// Ticket of the most recent list fetch.
    pub fn latest_ticket(&self) -> u64 {
        self.ticket
    }

    pub fn cards(&self) -> Vec<ProductCard> {
        self.visible
            .iter()
            .map(|p| ProductCard {
                id: p.id,
                name: p.name.clone(),
                price_label: p.price_label.clone(),
                image: p.image.as_deref().map(|url| self.config.image_url(url)),
                favorite: self.is_favorite(p.id),
                can_add_to_cart: p.can_add_to_cart(),
            })
            .collect()
    }

    /// Placeholder text when nothing is rendered.
    pub fn empty_text(&self) -> Option<&'static str> {
        (!self.loading && self.visible.is_empty()).then_some(NO_PRODUCTS)
    }
}
