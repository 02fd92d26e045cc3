//! The route search view.

use std::future::Future;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, RouteSearchRequest};
use crate::domain::Route;
use crate::query::{LoadOutcome, QuerySlot};

use super::compose::{ItineraryStep, RouteSummary, compose};

/// Finds routes between two locations on a date.
pub trait RouteFinder: Send + Sync {
    fn find_routes(
        &self,
        request: &RouteSearchRequest,
    ) -> impl Future<Output = Result<Vec<Route>, ApiError>> + Send;
}

impl RouteFinder for ApiClient {
    async fn find_routes(&self, request: &RouteSearchRequest) -> Result<Vec<Route>, ApiError> {
        self.search_routes(request).await
    }
}

/// A route ready for display: its summary plus the expanded steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedRoute {
    pub summary: RouteSummary,
    pub steps: Vec<ItineraryStep>,
}

impl ComposedRoute {
    /// Compose `route` for display.
    pub fn new(route: &Route) -> Self {
        Self {
            summary: RouteSummary::of(route),
            steps: compose(route),
        }
    }
}

/// What the route search page shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSearchState {
    /// The request whose results are shown.
    pub request: Option<RouteSearchRequest>,
    pub routes: Vec<ComposedRoute>,
    /// False until a search has been committed, so "no routes found" can
    /// be told apart from "not searched yet".
    pub has_searched: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl RouteSearchState {
    /// Message for an empty result list.
    pub fn empty_message(&self) -> &'static str {
        if self.has_searched {
            "No routes found for the selected criteria. Please try different locations or date."
        } else {
            "Please select origin, destination and date, then search to find available routes."
        }
    }
}

/// Route search with last-issued-wins semantics.
pub struct RouteSearch<F> {
    finder: F,
    slot: QuerySlot,
    state: Mutex<RouteSearchState>,
}

impl<F: RouteFinder> RouteSearch<F> {
    /// Create a view with nothing searched yet.
    pub fn new(finder: F) -> Self {
        Self {
            finder,
            slot: QuerySlot::new(),
            state: Mutex::new(RouteSearchState::default()),
        }
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> RouteSearchState {
        self.state.lock().await.clone()
    }

    /// Search and, if no newer search was issued meanwhile, show the results.
    ///
    /// A failure keeps the previous results and sets the error message.
    pub async fn search(&self, request: RouteSearchRequest) -> LoadOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            state.has_searched = true;
            state.loading = true;
            self.slot.issue()
        };

        debug!(
            origin = %request.origin,
            destination = %request.destination,
            date = %request.date,
            seq = ticket.seq(),
            "searching routes"
        );
        let result = self.finder.find_routes(&request).await;

        let mut state = self.state.lock().await;
        if !self.slot.is_current(ticket) {
            debug!(seq = ticket.seq(), "discarding superseded route search");
            return LoadOutcome::Superseded;
        }
        state.loading = false;
        match result {
            Ok(routes) => {
                info!(
                    origin = %request.origin,
                    destination = %request.destination,
                    found = routes.len(),
                    "route search complete"
                );
                state.routes = routes.iter().map(ComposedRoute::new).collect();
                state.request = Some(request);
                state.error = None;
                LoadOutcome::Committed
            }
            Err(e) => {
                warn!(error = %e, "route search failed");
                let message = e.user_message();
                state.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }
}
