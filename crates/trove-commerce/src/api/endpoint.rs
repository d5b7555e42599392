//! The store's REST endpoints.

use std::fmt;

use trove_data::Method;

use crate::catalog::Category;
use crate::ids::Sku;

/// One call the storefront can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Products(Category),
    Product(Sku),
    Cart,
    AddToCart(Sku),
    RemoveFromCart(Sku),
    Favorite(Sku),
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Products(_) | Endpoint::Product(_) | Endpoint::Cart => Method::Get,
            Endpoint::AddToCart(_) | Endpoint::RemoveFromCart(_) | Endpoint::Favorite(_) => {
                Method::Patch
            }
        }
    }

    /// Unencoded path segments below the API base.
    pub fn segments(&self) -> Vec<String> {
        let fixed = |parts: &[&str]| parts.iter().map(|p| p.to_string()).collect::<Vec<_>>();
        match self {
            Endpoint::Products(category) => fixed(&category.api_segments()),
            Endpoint::Product(sku) => fixed(&["api", "products", &sku.to_string()]),
            Endpoint::Cart => fixed(&["api", "cart"]),
            Endpoint::AddToCart(sku) => fixed(&["api", "cart", "add", &sku.to_string()]),
            Endpoint::RemoveFromCart(sku) => fixed(&["api", "cart", "remove", &sku.to_string()]),
            Endpoint::Favorite(sku) => fixed(&["api", "favorites", &sku.to_string()]),
        }
    }
}

impl fmt::Display for Endpoint {
    /// Unencoded `METHOD /path`; logs use [`StoreClient::describe`] instead.
    ///
    /// [`StoreClient::describe`]: crate::StoreClient::describe
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method(), self.segments().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_methods_and_segments() {
        assert_eq!(Endpoint::Products(Category::All).method(), Method::Get);
        assert_eq!(Endpoint::Favorite(Sku::new(4)).method(), Method::Patch);
        assert_eq!(
            Endpoint::RemoveFromCart(Sku::new(4)).to_string(),
            "PATCH /api/cart/remove/4"
        );
        assert_eq!(
            Endpoint::Products(Category::Favorite).segments(),
            ["api", "favorites"]
        );
    }
}
