//! Typed wrapper over the TechnoTrove REST endpoints.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use trove_data::{FetchClient, Response, Transport};
use url::Url;

use super::endpoint::Endpoint;
use super::error::StoreError;
use super::message::{Ack, FavoriteStatus, RemoveOutcome};
use crate::cart::CartEntry;
use crate::catalog::{ApiProduct, Category, ProductDetail, ProductSummary, ResolvedProduct};
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::Sku;

/// Client for the store API.
///
/// Cloning is cheap; clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: FetchClient,
    base: Url,
    config: StoreConfig,
}

impl StoreClient {
    /// Create a client that talks HTTP via `reqwest`.
    pub fn new(config: StoreConfig) -> Result<Self, CommerceError> {
        Self::from_fetch_client(config, FetchClient::new())
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        config: StoreConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, CommerceError> {
        Self::from_fetch_client(config, FetchClient::with_transport(transport))
    }

    fn from_fetch_client(config: StoreConfig, http: FetchClient) -> Result<Self, CommerceError> {
        let base = config.base_url()?;
        let http = http.with_default_header("Accept", "application/json");
        Ok(Self { http, base, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Image URL as it should be displayed.
    pub fn image_url(&self, raw: &str) -> String {
        self.config.image_url(raw)
    }

    /// `GET /api`, `/api/favorites` or `/api/{category}`.
    pub async fn list_products(&self, category: Category) -> Result<Vec<ProductSummary>, StoreError> {
        let products: Vec<ApiProduct> = self.get_json(Endpoint::Products(category)).await?;
        Ok(products
            .into_iter()
            .map(|p| ProductSummary::from_api(p, self.config.currency))
            .collect())
    }

    /// `GET /api/products/{sku}`.
    pub async fn product_detail(&self, sku: Sku) -> Result<ProductDetail, StoreError> {
        self.get_json(Endpoint::Product(sku)).await
    }

    /// Fetch the detail for `sku` and locate its active variant.
    pub async fn resolved_product(&self, sku: Sku) -> Result<ResolvedProduct, StoreError> {
        Ok(self.product_detail(sku).await?.resolve()?)
    }

    /// `GET /api/cart`.
    pub async fn cart(&self) -> Result<Vec<CartEntry>, StoreError> {
        self.get_json(Endpoint::Cart).await
    }

    /// `PATCH /api/cart/add/{sku}`. Any 2xx counts as success.
    pub async fn add_to_cart(&self, sku: Sku) -> Result<(), StoreError> {
        self.send(Endpoint::AddToCart(sku)).await.map(|_| ())
    }

    /// `PATCH /api/cart/remove/{sku}`.
    pub async fn remove_from_cart(&self, sku: Sku) -> Result<RemoveOutcome, StoreError> {
        let ack = self.patch_ack(Endpoint::RemoveFromCart(sku)).await?;
        Ok(RemoveOutcome::from(ack))
    }

    /// `PATCH /api/favorites/{sku}`.
    pub async fn toggle_favorite(&self, sku: Sku) -> Result<FavoriteStatus, StoreError> {
        let ack = self.patch_ack(Endpoint::Favorite(sku)).await?;
        Ok(FavoriteStatus::from(ack))
    }

    /// Absolute, percent-encoded URL for `endpoint`.
    pub fn url(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.base.clone();
        // `base_url()` rejected cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(endpoint.segments());
        }
        url
    }

    /// `METHOD /path` exactly as it goes on the wire.
    pub fn describe(&self, endpoint: &Endpoint) -> String {
        format!("{} {}", endpoint.method(), self.url(endpoint).path())
    }

    async fn send(&self, endpoint: Endpoint) -> Result<Response, StoreError> {
        let url = self.url(&endpoint);
        let resource = url.path().to_string();
        self.http
            .request(endpoint.method(), url.as_str())
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| StoreError::from_fetch(e, resource))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, StoreError> {
        let resource = self.url(&endpoint).path().to_string();
        self.send(endpoint)
            .await?
            .json()
            .map_err(|e| StoreError::from_fetch(e, resource))
    }

    async fn patch_ack(&self, endpoint: Endpoint) -> Result<Ack, StoreError> {
        let resource = self.url(&endpoint).path().to_string();
        let response = self.send(endpoint).await?;
        if response.is_blank() {
            return Ok(Ack::default());
        }
        response
            .json()
            .map_err(|e| StoreError::from_fetch(e, resource))
    }
}
