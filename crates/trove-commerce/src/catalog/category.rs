//! Catalog categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommerceError;

/// A category tab on the catalog screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    /// Every product.
    #[default]
    All,
    MobilePhones,
    Laptops,
    Televisions,
    Headphones,
    Consoles,
    /// Products the shopper has favorited.
    Favorite,
}

impl Category {
    /// Every category in tab order.
    pub const ALL: [Category; 7] = [
        Category::All,
        Category::MobilePhones,
        Category::Laptops,
        Category::Televisions,
        Category::Headphones,
        Category::Consoles,
        Category::Favorite,
    ];

    /// Label shown on the tab, also the API path segment for product categories.
    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::MobilePhones => "Mobile Phones",
            Category::Laptops => "Laptops",
            Category::Televisions => "Televisions",
            Category::Headphones => "Headphones",
            Category::Consoles => "Consoles",
            Category::Favorite => "Favorite",
        }
    }

    /// Path segments under the API base for this category's product list.
    pub fn api_segments(&self) -> Vec<&'static str> {
        match self {
            Category::All => vec!["api"],
            Category::Favorite => vec!["api", "favorites"],
            other => vec!["api", other.label()],
        }
    }

    pub fn is_favorites(&self) -> bool {
        matches!(self, Category::Favorite)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| {
                c.label().eq_ignore_ascii_case(wanted)
                    || c.label().replace(' ', "-").eq_ignore_ascii_case(wanted)
            })
            .or_else(|| wanted.eq_ignore_ascii_case("favorites").then_some(Category::Favorite))
            .ok_or_else(|| CommerceError::UnknownCategory(s.to_string()))
    }
}
