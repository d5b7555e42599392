//! User-visible acknowledgments.

use trove_commerce::ErrorKind;

pub const ADDED_TO_CART: &str = "Product added to cart.";
pub const ADD_TO_CART_FAILED: &str = "Failed to add product to cart. Please try again later.";
pub const PRODUCT_FETCH_FAILED: &str = "Failed to fetch product details. Please try again later.";
pub const FAVORITE_FAILED: &str = "Failed to update favorites. Please try again later.";
pub const REMOVE_FAILED: &str = "Failed to remove product from cart. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A dismissable dialog with a title and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Set for error notices raised by a failed request.
    pub error: Option<ErrorKind>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            error: Some(kind),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::Success => "Success",
            NoticeKind::Error => "Error",
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(Notice::success(ADDED_TO_CART).title(), "Success");
        let err = Notice::error(ADD_TO_CART_FAILED, ErrorKind::Server);
        assert_eq!(err.title(), "Error");
        assert!(err.is_error());
        assert_eq!(err.error, Some(ErrorKind::Server));
    }
}
