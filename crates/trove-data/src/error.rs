//! Transport-level failures.

use thiserror::Error;

/// Why a request did not yield a usable response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// No response arrived: connection refused, DNS failure, reset.
    #[error("Request failed: {0}")]
    RequestError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The body could not be decoded.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = FetchError::HttpError {
            status: 500,
            message: "db down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: db down");
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
    }
}
