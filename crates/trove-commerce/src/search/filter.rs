//! Search-as-you-type filtering.

use crate::catalog::ProductSummary;

/// Case-insensitive substring filter over product names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
    needle: String,
}

impl SearchFilter {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let needle = query.to_lowercase();
        Self { query, needle }
    }

    /// The query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// A whitespace-only query matches everything.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.is_blank() || name.to_lowercase().contains(&self.needle)
    }

    /// The subsequence of `products` whose names match, order preserved.
    pub fn apply(&self, products: &[ProductSummary]) -> Vec<ProductSummary> {
        products
            .iter()
            .filter(|p| self.matches(&p.name))
            .cloned()
            .collect()
    }
}
