//! Navigation stack.

use std::fmt;

use crate::cart::CartScreen;
use crate::catalog::CatalogScreen;
use crate::command::{Command, Outcome};
use crate::detail::DetailScreen;
use crate::notice::Notice;

/// The three routes of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The catalog; always at the bottom of the stack.
    TechnoTrove,
    Cart,
    ProductDescriptionPage,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::TechnoTrove => "TechnoTrove",
            Route::Cart => "Cart",
            Route::ProductDescriptionPage => "ProductDescriptionPage",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A live screen instance.
#[derive(Debug, Clone)]
pub enum Screen {
    Catalog(CatalogScreen),
    Cart(CartScreen),
    Detail(Box<DetailScreen>),
}

impl Screen {
    pub fn route(&self) -> Route {
        match self {
            Screen::Catalog(_) => Route::TechnoTrove,
            Screen::Cart(_) => Route::Cart,
            Screen::Detail(_) => Route::ProductDescriptionPage,
        }
    }

    pub fn mount(&mut self) -> Vec<Command> {
        match self {
            Screen::Catalog(s) => s.mount(),
            Screen::Cart(s) => s.mount(),
            Screen::Detail(s) => s.mount(),
        }
    }

    pub fn focus(&mut self) -> Vec<Command> {
        match self {
            Screen::Catalog(s) => s.focus(),
            Screen::Cart(s) => s.focus(),
            Screen::Detail(s) => s.focus(),
        }
    }

    pub fn on_outcome(&mut self, outcome: Outcome) -> Vec<Command> {
        match self {
            Screen::Catalog(s) => s.on_outcome(outcome),
            Screen::Cart(s) => s.on_outcome(outcome),
            Screen::Detail(s) => s.on_outcome(outcome),
        }
    }

    /// The dialog currently raised on this screen, if any.
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Screen::Catalog(s) => s.notice(),
            Screen::Cart(s) => s.notice(),
            Screen::Detail(s) => s.notice(),
        }
    }
}

/// Stack of screens over a catalog root that is never popped.
#[derive(Debug, Clone)]
pub struct NavStack {
    root: Screen,
    above: Vec<Screen>,
}

impl NavStack {
    pub fn new(root: CatalogScreen) -> Self {
        Self {
            root: Screen::Catalog(root),
            above: Vec::new(),
        }
    }

    /// Mount the root screen.
    pub fn start(&mut self) -> Vec<Command> {
        self.root.mount()
    }

    /// Push a fresh screen and mount it.
    pub fn push(&mut self, screen: Screen) -> Vec<Command> {
        self.above.push(screen);
        self.current_mut().mount()
    }

    /// Pop the top screen and focus the one revealed.
    ///
    /// Returns `None` at the root.
    pub fn back(&mut self) -> Option<Vec<Command>> {
        self.above.pop()?;
        Some(self.current_mut().focus())
    }

    pub fn current(&self) -> &Screen {
        self.above.last().unwrap_or(&self.root)
    }

    pub fn current_mut(&mut self) -> &mut Screen {
        self.above.last_mut().unwrap_or(&mut self.root)
    }

    pub fn route(&self) -> Route {
        self.current().route()
    }

    /// Routes from the root to the top.
    pub fn routes(&self) -> Vec<Route> {
        std::iter::once(&self.root)
            .chain(self.above.iter())
            .map(Screen::route)
            .collect()
    }

    pub fn depth(&self) -> usize {
        self.above.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use trove_commerce::StoreConfig;

    use super::*;

    fn stack() -> NavStack {
        NavStack::new(CatalogScreen::new(StoreConfig::default()))
    }

    #[test]
    fn test_push_mounts_and_back_focuses() {
        let mut nav = stack();
        assert_eq!(nav.route(), Route::TechnoTrove);

        let commands = nav.push(Screen::Cart(CartScreen::new(StoreConfig::default())));
        assert_eq!(commands, [Command::FetchCart]);
        assert_eq!(nav.routes(), [Route::TechnoTrove, Route::Cart]);

        let commands = nav.back().unwrap();
        assert!(matches!(commands[..], [Command::FetchProducts { .. }]));
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn test_back_at_root_is_none() {
        let mut nav = stack();
        assert!(nav.back().is_none());
        assert_eq!(nav.route(), Route::TechnoTrove);
    }

    #[test]
    fn test_notice_follows_current_screen() {
        let mut nav = stack();
        nav.push(Screen::Cart(CartScreen::new(StoreConfig::default())));
        assert!(nav.current().notice().is_none());

        if let Screen::Cart(cart) = nav.current_mut() {
            cart.on_outcome(Outcome::RemovedFromCart {
                sku: trove_commerce::Sku::new(3),
                result: Err(trove_commerce::StoreError::Network("down".into())),
            });
        }
        let notice = nav.current().notice().unwrap();
        assert!(notice.is_error());
        assert_eq!(notice.error, Some(trove_commerce::ErrorKind::Network));
    }

    #[test]
    fn test_route_names() {
        assert_eq!(Route::TechnoTrove.to_string(), "TechnoTrove");
        assert_eq!(Route::ProductDescriptionPage.name(), "ProductDescriptionPage");
    }
}
