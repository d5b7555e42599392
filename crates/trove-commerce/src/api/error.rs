//! Errors surfaced by the store API.

use http::StatusCode;
use thiserror::Error;
use trove_data::FetchError;

use crate::error::CommerceError;

/// A failed store API call, classified for the screens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The server answered 404.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// No response arrived (connection refused, timeout, reset).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status other than 404.
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// The body could not be decoded into the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

/// Coarse error category shared by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Network,
    Server,
    InvalidResponse,
}

impl ErrorKind {
    /// Short text suitable for an inline error banner.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "The requested item could not be found.",
            ErrorKind::Network => "Unable to reach the store. Check your connection.",
            ErrorKind::Server => "The store is having trouble. Please try again later.",
            ErrorKind::InvalidResponse => "The store sent an unexpected response.",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Network => "network",
            ErrorKind::Server => "server",
            ErrorKind::InvalidResponse => "invalid_response",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StoreError {
    /// Classify a transport-level failure for `resource` (the request path).
    pub fn from_fetch(err: FetchError, resource: impl Into<String>) -> Self {
        match err {
            FetchError::HttpError { status, message } => {
                match StatusCode::from_u16(status) {
                    Ok(StatusCode::NOT_FOUND) => StoreError::NotFound {
                        resource: resource.into(),
                    },
                    Ok(code) if message.trim().is_empty() => StoreError::Server {
                        status,
                        message: code.canonical_reason().unwrap_or_default().to_string(),
                    },
                    _ => StoreError::Server { status, message },
                }
            }
            FetchError::RequestError(msg) | FetchError::InvalidUrl(msg) => {
                StoreError::Network(msg)
            }
            FetchError::Timeout => StoreError::Network("request timed out".to_string()),
            FetchError::ParseError(msg) => StoreError::InvalidResponse(msg),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Network(_) => ErrorKind::Network,
            StoreError::Server { .. } => ErrorKind::Server,
            StoreError::InvalidResponse(_) | StoreError::Commerce(_) => ErrorKind::InvalidResponse,
        }
    }

    /// Whether retrying later might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Network(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Sku;

    #[test]
    fn test_classify_not_found() {
        let err = StoreError::from_fetch(
            FetchError::HttpError {
                status: 404,
                message: "nope".to_string(),
            },
            "/api/products/9",
        );
        assert_eq!(
            err,
            StoreError::NotFound {
                resource: "/api/products/9".to_string()
            }
        );
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!err.is_transient());
    }

    #[test]
    fn test_classify_server_uses_reason_for_empty_body() {
        let err = StoreError::from_fetch(
            FetchError::HttpError {
                status: 503,
                message: String::new(),
            },
            "/api",
        );
        assert_eq!(
            err,
            StoreError::Server {
                status: 503,
                message: "Service Unavailable".to_string()
            }
        );
    }

    #[test]
    fn test_classify_transport_and_decode() {
        let network = StoreError::from_fetch(FetchError::Timeout, "/api/cart");
        assert_eq!(network.kind(), ErrorKind::Network);
        assert!(network.is_transient());

        let decode =
            StoreError::from_fetch(FetchError::ParseError("eof".to_string()), "/api/cart");
        assert_eq!(decode.kind(), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_domain_error_is_invalid_response() {
        let err: StoreError = CommerceError::ActiveVariantMissing {
            active: Sku::new(3),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert!(err.to_string().contains("Active variant 3"));
    }
}
