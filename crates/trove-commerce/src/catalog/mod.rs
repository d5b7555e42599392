//! Product catalog module.
//!
//! Contains categories, catalog list items and product detail payloads.

mod category;
mod product;
mod variant;

pub use category::Category;
pub use product::{ApiProduct, ProductSummary};
pub use variant::{ProductDetail, ProductRef, ResolvedProduct, Variant};
