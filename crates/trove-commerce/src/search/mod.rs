//! Search module.
//!
//! Client-side filtering of the fetched catalog list.

mod filter;

pub use filter::SearchFilter;
