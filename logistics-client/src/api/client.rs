//! Planner API HTTP client.
//!
//! Provides async methods for the location, transportation and route
//! endpoints. Every response is unwrapped from its envelope; route search
//! results are checked for contiguity before they reach the caller.

use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::domain::{
    Location, LocationDraft, LocationId, Route, Transportation, TransportationDraft,
    TransportationId,
};

use super::envelope::{unwrap_body, unwrap_data};
use super::error::ApiError;
use super::page::Page;
use super::params::{LocationListParams, RouteSearchRequest, TransportationListParams};

/// Default base URL for the planner API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Create a config for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Planner API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::NotConfigured(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and unwrap the envelope's `data`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        unwrap_data(status, &body)
    }

    /// Send a request whose successful envelope carries no data.
    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        unwrap_body::<serde_json::Value>(status, &body).map(|_| ())
    }

    // ------------------------------------------------------------------
    // Locations
    // ------------------------------------------------------------------

    /// List one page of locations.
    pub async fn list_locations(
        &self,
        params: &LocationListParams,
    ) -> Result<Page<Location>, ApiError> {
        let query = params.to_query();
        debug!(?query, "GET /locations");
        self.send(self.http.get(self.url("/locations")).query(&query))
            .await
    }

    /// Get a single location.
    pub async fn get_location(&self, id: LocationId) -> Result<Location, ApiError> {
        self.send(self.http.get(self.url(&format!("/locations/{id}"))))
            .await
    }

    /// Create a location. The draft is validated before sending.
    pub async fn create_location(&self, draft: &LocationDraft) -> Result<Location, ApiError> {
        let draft = draft.validate()?;
        self.send(self.http.post(self.url("/locations")).json(&draft))
            .await
    }

    /// Replace a location's fields. The draft is validated before sending.
    pub async fn update_location(
        &self,
        id: LocationId,
        draft: &LocationDraft,
    ) -> Result<Location, ApiError> {
        let draft = draft.validate()?;
        self.send(
            self.http
                .put(self.url(&format!("/locations/{id}")))
                .json(&draft),
        )
        .await
    }

    /// Delete a location.
    pub async fn delete_location(&self, id: LocationId) -> Result<(), ApiError> {
        self.send_empty(self.http.delete(self.url(&format!("/locations/{id}"))))
            .await
    }

    // ------------------------------------------------------------------
    // Transportations
    // ------------------------------------------------------------------

    /// List one page of transportations.
    pub async fn list_transportations(
        &self,
        params: &TransportationListParams,
    ) -> Result<Page<Transportation>, ApiError> {
        let query = params.to_query();
        debug!(?query, "GET /transportations");
        self.send(self.http.get(self.url("/transportations")).query(&query))
            .await
    }

    /// Get a single transportation.
    pub async fn get_transportation(
        &self,
        id: TransportationId,
    ) -> Result<Transportation, ApiError> {
        self.send(self.http.get(self.url(&format!("/transportations/{id}"))))
            .await
    }

    /// Create a transportation. The draft is validated before sending.
    pub async fn create_transportation(
        &self,
        draft: &TransportationDraft,
    ) -> Result<Transportation, ApiError> {
        let draft = draft.validate()?;
        self.send(self.http.post(self.url("/transportations")).json(&draft))
            .await
    }

    /// Replace a transportation. The draft is validated before sending.
    pub async fn update_transportation(
        &self,
        id: TransportationId,
        draft: &TransportationDraft,
    ) -> Result<Transportation, ApiError> {
        let draft = draft.validate()?;
        self.send(
            self.http
                .put(self.url(&format!("/transportations/{id}")))
                .json(&draft),
        )
        .await
    }

    /// Delete a transportation.
    pub async fn delete_transportation(&self, id: TransportationId) -> Result<(), ApiError> {
        self.send_empty(
            self.http
                .delete(self.url(&format!("/transportations/{id}"))),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Routes
    // ------------------------------------------------------------------

    /// Search routes between two locations on a date.
    ///
    /// Every returned leg list must form a contiguous chain. A broken chain
    /// is a backend defect: it is logged and returned as
    /// [`ApiError::Contract`] instead of being rendered. Routes with a leg
    /// that does not run on the requested date are logged and left out.
    pub async fn search_routes(&self, request: &RouteSearchRequest) -> Result<Vec<Route>, ApiError> {
        let query = request.to_query();
        debug!(?query, "GET /routes/search");
        let raw: Vec<Vec<Transportation>> = self
            .send(self.http.get(self.url("/routes/search")).query(&query))
            .await?;

        let mut routes = Vec::with_capacity(raw.len());
        for (i, legs) in raw.into_iter().enumerate() {
            let route = Route::new(legs).map_err(|e| {
                error!(route = i, error = %e, "route search returned a broken route");
                ApiError::Contract(e)
            })?;
            if route.operates_on(request.date) {
                routes.push(route);
            } else {
                warn!(route = i, date = %request.date, "dropping route with a leg not running that day");
            }
        }
        Ok(routes)
    }
}
