//! Application state for the web layer.

use std::sync::Arc;

use futures::future::join;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::itinerary::RouteSearch;
use crate::query::{Locations, QueryCoordinator, QueryError, Transportations};
use crate::typeahead::EndpointFields;

/// Shared application state.
///
/// One set of views per process: the web surface serves a single operator,
/// so every request sees the same list views and form fields.
#[derive(Clone)]
pub struct AppState {
    /// Location list view
    pub locations: Arc<QueryCoordinator<Locations, ApiClient>>,

    /// Transportation list view
    pub transportations: Arc<QueryCoordinator<Transportations, ApiClient>>,

    /// Origin/destination typeahead fields
    pub endpoints: Arc<EndpointFields<ApiClient>>,

    /// Route search view
    pub routes: Arc<RouteSearch<ApiClient>>,
}

impl AppState {
    /// Create the views over one API client.
    pub fn new(client: ApiClient, config: &ClientConfig) -> Result<Self, QueryError> {
        Ok(Self {
            locations: Arc::new(QueryCoordinator::new(client.clone(), config.page_size)?),
            transportations: Arc::new(QueryCoordinator::new(client.clone(), config.page_size)?),
            endpoints: Arc::new(EndpointFields::new(
                client.clone(),
                config.lookup_debounce,
                config.lookup_limit,
            )),
            routes: Arc::new(RouteSearch::new(client)),
        })
    }

    /// Fetch the first page of both list views.
    pub async fn mount(&self) {
        let (locations, transportations) =
            join(self.locations.load(), self.transportations.load()).await;
        tracing::info!(?locations, ?transportations, "list views mounted");
    }
}
