//! Pluggable request execution.
//!
//! [`FetchClient`](crate::FetchClient) builds requests; a [`Transport`]
//! executes them. The default transport is backed by `reqwest`, which runs
//! natively and in the browser (via `fetch`) alike.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{FetchError, RequestBuilder, Response};

/// Executes a fully built request and buffers the response.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured `reqwest` client (proxies, TLS roots, user agent).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
        } = request;

        let mut builder = self.client.request(method.into(), url.as_str());
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use serde_json::json;

    use super::*;
    use crate::Method;

    #[tokio::test]
    async fn test_reqwest_transport_get_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/Laptops");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([{"sku_id": 1, "name": "X"}]));
            })
            .await;

        let transport = ReqwestTransport::new();
        let response = transport
            .execute(RequestBuilder::new(Method::Get, server.url("/api/Laptops")))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(response.is_success());
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        let body: serde_json::Value = response.json().unwrap();
        assert_eq!(body[0]["name"], "X");
    }

    #[tokio::test]
    async fn test_reqwest_transport_patch_sends_headers() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/api/cart/remove/7")
                    .header("accept", "application/json");
                then.status(200)
                    .json_body(json!({"message": "Product removed from cart."}));
            })
            .await;

        let transport = ReqwestTransport::new();
        let request = RequestBuilder::new(Method::Patch, server.url("/api/cart/remove/7"))
            .header("Accept", "application/json");
        let response = transport.execute(request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_reqwest_transport_non_success_is_not_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products/99");
                then.status(404).body("Product not found");
            })
            .await;

        let response = ReqwestTransport::new()
            .execute(RequestBuilder::new(Method::Get, server.url("/api/products/99")))
            .await
            .unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.text().unwrap(), "Product not found");
    }

    #[tokio::test]
    async fn test_reqwest_transport_connection_refused() {
        // Port 9 (discard) on loopback is not expected to be listening.
        let result = ReqwestTransport::new()
            .execute(RequestBuilder::new(Method::Get, "http://127.0.0.1:9/api"))
            .await;

        assert!(matches!(result, Err(FetchError::RequestError(_))));
    }
}
