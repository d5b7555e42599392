//! TechnoTrove REST API.
//!
//! [`StoreClient`] wraps every endpoint the storefront uses. Responses are
//! decoded into domain types here, including the acknowledgment messages
//! the server uses as success signals.

mod client;
mod endpoint;
mod error;
mod message;

pub use client::StoreClient;
pub use endpoint::Endpoint;
pub use error::{ErrorKind, StoreError};
pub use message::{
    Ack, FavoriteStatus, RemoveOutcome, FAVORITE_ADDED, FAVORITE_REMOVED, REMOVED_FROM_CART,
};
