//! Acknowledgment bodies returned by the write endpoints.

use serde::{Deserialize, Serialize};

/// Body of a successful `PATCH /api/cart/remove/{sku}`.
pub const REMOVED_FROM_CART: &str = "Product removed from cart.";

/// Body of `PATCH /api/favorites/{sku}` when the product became a favorite.
pub const FAVORITE_ADDED: &str = "Product added to favorites.";

/// Body of `PATCH /api/favorites/{sku}` when the product stopped being one.
pub const FAVORITE_REMOVED: &str = "Product removed from favorites.";

/// `{"message": "..."}`. A missing message decodes as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}

/// Result of asking the server to remove a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    /// The server answered with some other message; nothing is assumed.
    Other(String),
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed)
    }
}

impl From<Ack> for RemoveOutcome {
    fn from(ack: Ack) -> Self {
        if ack.message == REMOVED_FROM_CART {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::Other(ack.message)
        }
    }
}

/// Favorite state reported by the toggle endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteStatus {
    Added,
    Removed,
    Unrecognized(String),
}

impl FavoriteStatus {
    /// The confirmed flag, or `None` when the message is unrecognized.
    pub fn confirmed(&self) -> Option<bool> {
        match self {
            FavoriteStatus::Added => Some(true),
            FavoriteStatus::Removed => Some(false),
            FavoriteStatus::Unrecognized(_) => None,
        }
    }
}

impl From<Ack> for FavoriteStatus {
    fn from(ack: Ack) -> Self {
        match ack.message.as_str() {
            FAVORITE_ADDED => FavoriteStatus::Added,
            FAVORITE_REMOVED => FavoriteStatus::Removed,
            _ => FavoriteStatus::Unrecognized(ack.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ack(message: &str) -> Ack {
        Ack {
            message: message.to_string(),
        }
    }

    #[test]
    fn test_remove_outcome_requires_exact_literal() {
        assert!(RemoveOutcome::from(ack("Product removed from cart.")).is_removed());
        assert_eq!(
            RemoveOutcome::from(ack("product removed from cart")),
            RemoveOutcome::Other("product removed from cart".to_string())
        );
    }

    #[test]
    fn test_favorite_status_decoding() {
        assert_eq!(
            FavoriteStatus::from(ack(FAVORITE_ADDED)).confirmed(),
            Some(true)
        );
        assert_eq!(
            FavoriteStatus::from(ack(FAVORITE_REMOVED)).confirmed(),
            Some(false)
        );
        assert_eq!(FavoriteStatus::from(ack("ok")).confirmed(), None);
    }

    #[test]
    fn test_missing_message_decodes_empty() {
        let ack: Ack = serde_json::from_str("{}").unwrap();
        assert_eq!(RemoveOutcome::from(ack), RemoveOutcome::Other(String::new()));
    }
}
