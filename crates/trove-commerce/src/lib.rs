//! TechnoTrove storefront domain.
//!
//! Domain types for the catalog, product variants and the server-side cart,
//! plus [`StoreClient`], a typed client for the store's REST API.
//!
//! # Example
//!
//! ```rust,ignore
//! use trove_commerce::prelude::*;
//!
//! let client = StoreClient::new(StoreConfig::default())?;
//! for product in client.list_products(Category::Laptops).await? {
//!     println!("{} {}", product.name, product.price_label);
//! }
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod money;
pub mod search;

pub use api::{Endpoint, ErrorKind, FavoriteStatus, RemoveOutcome, StoreClient, StoreError};
pub use config::{HostRewrite, StoreConfig};
pub use error::CommerceError;
pub use ids::Sku;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{Endpoint, ErrorKind, FavoriteStatus, RemoveOutcome, StoreClient, StoreError};
    pub use crate::cart::{cart_total, CartEntry};
    pub use crate::catalog::{Category, ProductDetail, ProductSummary, ResolvedProduct, Variant};
    pub use crate::config::{HostRewrite, StoreConfig};
    pub use crate::error::CommerceError;
    pub use crate::ids::Sku;
    pub use crate::money::{Currency, Money};
    pub use crate::search::SearchFilter;
}
