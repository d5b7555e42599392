//! Shopping cart module.
//!
//! The cart itself lives on the server; this module holds its entries as
//! returned by the API and the client-side running total.

mod entry;

pub use entry::{cart_total, CartEntry};
