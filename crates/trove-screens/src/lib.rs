//! Headless screens for the TechnoTrove storefront.
//!
//! Each screen is a plain state struct with an `update` function that takes
//! a message and returns [`Command`]s. The [`Storefront`] driver executes
//! those commands against a [`trove_commerce::StoreClient`], feeds the
//! [`Outcome`]s back, and owns the navigation stack. Front ends (the CLI, the
//! web app) render the screen state and forward user input as [`Event`]s.
//!
//! Data is only fetched on explicit edges: a screen being mounted, regaining
//! focus, a category change, or a user action that implies a refresh.

pub mod cart;
pub mod catalog;
pub mod command;
pub mod detail;
pub mod driver;
pub mod nav;
pub mod notice;

pub use cart::{CartLine, CartMsg, CartScreen};
pub use catalog::{CatalogMsg, CatalogScreen, ProductCard};
pub use command::{Command, Navigation, Outcome};
pub use detail::{DetailMsg, DetailScreen, Slide, VariantCard};
pub use driver::{Event, Reply, Request, Step, Storefront};
pub use nav::{NavStack, Route, Screen};
pub use notice::{Notice, NoticeKind};
