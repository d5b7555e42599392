//! HTTP plumbing for the TechnoTrove storefront client.
//!
//! A [`FetchClient`] stamps default headers onto requests and hands them to a
//! pluggable [`Transport`]; responses come back fully buffered. The reqwest
//! transport runs natively (CLI) and in the browser (Leptos frontend).
//!
//! # Example
//!
//! ```rust,ignore
//! use trove_data::{FetchClient, Method};
//!
//! let client = FetchClient::new().with_default_header("Accept", "application/json");
//! let body: serde_json::Value = client
//!     .request(Method::Patch, "http://10.0.2.2:8080/api/cart/remove/12")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;
mod transport;

use std::collections::HashMap;
use std::sync::Arc;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use transport::{ReqwestTransport, Transport};

/// Entry point for outbound requests.
///
/// Clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    default_headers: HashMap<String, String>,
    transport: Arc<dyn Transport>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// A client backed by `reqwest`.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            default_headers: HashMap::new(),
            transport,
        }
    }

    /// Header sent with every request from this client.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Start a request to an absolute `url`.
    pub fn request(&self, method: Method, url: impl Into<String>) -> PendingRequest {
        let request = self
            .default_headers
            .iter()
            .fold(RequestBuilder::new(method, url), |req, (key, value)| {
                req.header(key.clone(), value.clone())
            });

        PendingRequest {
            request,
            transport: Arc::clone(&self.transport),
        }
    }
}

/// A request bound to the transport that will execute it.
pub struct PendingRequest {
    request: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl PendingRequest {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    /// The request as it will be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.request
    }

    /// Execute the request.
    ///
    /// Non-2xx statuses come back as responses; see
    /// [`Response::error_for_status`].
    pub async fn send(self) -> Result<Response, FetchError> {
        self.transport.execute(self.request).await
    }
}

pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response, Transport};
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_headers_stamped_on_requests() {
        let client = FetchClient::with_transport(Arc::new(ReqwestTransport::new()))
            .with_default_header("Accept", "application/json");

        let pending = client
            .request(Method::Patch, "http://10.0.2.2:8080/api/favorites/3")
            .header("X-Session", "s-1");

        let headers = pending.request().headers();
        assert_eq!(headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(headers.get("X-Session").map(String::as_str), Some("s-1"));
        assert_eq!(pending.request().method(), Method::Patch);
    }

    #[tokio::test]
    async fn test_send_goes_through_transport() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api").header("accept", "application/json");
                then.status(200).json_body(json!([]));
            })
            .await;

        let response = FetchClient::new()
            .with_default_header("Accept", "application/json")
            .request(Method::Get, server.url("/api"))
            .send()
            .await
            .unwrap();

        assert!(response.is_success());
        mock.assert_async().await;
    }
}
