//! Effects requested by screens and the results fed back to them.

use trove_commerce::cart::CartEntry;
use trove_commerce::catalog::{Category, ProductSummary, ResolvedProduct};
use trove_commerce::{Endpoint, FavoriteStatus, RemoveOutcome, Sku, StoreError};

/// Side effect a screen asks the driver to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// List products for a category. `ticket` identifies the request.
    FetchProducts { category: Category, ticket: u64 },
    FetchCart,
    /// Fetch and resolve the detail payload for a SKU.
    FetchProduct(Sku),
    AddToCart(Sku),
    RemoveFromCart(Sku),
    ToggleFavorite(Sku),
    Navigate(Navigation),
}

impl Command {
    /// The store call this command makes; `None` for navigation.
    pub fn endpoint(&self) -> Option<Endpoint> {
        let endpoint = match self {
            Command::FetchProducts { category, .. } => Endpoint::Products(*category),
            Command::FetchCart => Endpoint::Cart,
            Command::FetchProduct(sku) => Endpoint::Product(*sku),
            Command::AddToCart(sku) => Endpoint::AddToCart(*sku),
            Command::RemoveFromCart(sku) => Endpoint::RemoveFromCart(*sku),
            Command::ToggleFavorite(sku) => Endpoint::Favorite(*sku),
            Command::Navigate(_) => return None,
        };
        Some(endpoint)
    }
}

/// A change to the navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    OpenCart,
    OpenProduct(Box<ResolvedProduct>),
    Back,
}

/// Result of a command, delivered to the screen that is current when it
/// completes.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Products {
        ticket: u64,
        result: Result<Vec<ProductSummary>, StoreError>,
    },
    Cart(Result<Vec<CartEntry>, StoreError>),
    Product {
        sku: Sku,
        result: Result<ResolvedProduct, StoreError>,
    },
    AddedToCart {
        sku: Sku,
        result: Result<(), StoreError>,
    },
    RemovedFromCart {
        sku: Sku,
        result: Result<RemoveOutcome, StoreError>,
    },
    Favorite {
        sku: Sku,
        result: Result<FavoriteStatus, StoreError>,
    },
}

impl Outcome {
    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Outcome::Products { result, .. } => result.as_ref().err(),
            Outcome::Cart(result) => result.as_ref().err(),
            Outcome::Product { result, .. } => result.as_ref().err(),
            Outcome::AddedToCart { result, .. } => result.as_ref().err(),
            Outcome::RemovedFromCart { result, .. } => result.as_ref().err(),
            Outcome::Favorite { result, .. } => result.as_ref().err(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(
            Command::FetchProducts {
                category: Category::MobilePhones,
                ticket: 1
            }
            .endpoint(),
            Some(Endpoint::Products(Category::MobilePhones))
        );
        assert_eq!(
            Command::RemoveFromCart(Sku::new(4)).endpoint(),
            Some(Endpoint::RemoveFromCart(Sku::new(4)))
        );
        assert_eq!(Command::Navigate(Navigation::Back).endpoint(), None);
    }
}
