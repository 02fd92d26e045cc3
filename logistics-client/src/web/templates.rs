//! Askama templates for the route search page.

use askama::Template;

use crate::itinerary::{ComposedRoute, ItineraryStep, RouteSearchState};

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Route search form and results.
#[derive(Template)]
#[template(path = "routes.html")]
pub struct RoutesTemplate {
    pub origin: String,
    pub destination: String,
    pub date: String,
    pub routes: Vec<RouteView>,
    pub empty_message: String,
    pub error: Option<String>,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

impl RoutesTemplate {
    /// Build the page for a search state.
    pub fn from_state(state: &RouteSearchState) -> Self {
        let (origin, destination, date) = match &state.request {
            Some(req) => (
                req.origin.to_string(),
                req.destination.to_string(),
                crate::api::format_date(req.date),
            ),
            None => Default::default(),
        };

        Self {
            origin,
            destination,
            date,
            routes: state
                .routes
                .iter()
                .enumerate()
                .map(|(i, r)| RouteView::from_route(i, r))
                .collect(),
            empty_message: state.empty_message().to_string(),
            error: state.error.clone(),
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// One route card.
#[derive(Debug, Clone)]
pub struct RouteView {
    /// "Route 1", "Route 2", ...
    pub title: String,
    pub via: Option<String>,
    pub legs: usize,
    pub steps: Vec<StepView>,
}

impl RouteView {
    /// Create from a composed route at position `index`.
    pub fn from_route(index: usize, route: &ComposedRoute) -> Self {
        Self {
            title: format!("Route {}", index + 1),
            via: route.summary.via_label(),
            legs: route.summary.leg_count,
            steps: route.steps.iter().map(StepView::from_step).collect(),
        }
    }
}

/// One waypoint in the details timeline.
#[derive(Debug, Clone)]
pub struct StepView {
    pub label: String,
    /// Wire name of the outgoing kind, e.g. "FLIGHT"
    pub kind: Option<String>,
    pub instruction: Option<String>,
    pub is_last: bool,
}

impl StepView {
    /// Create from an itinerary step.
    pub fn from_step(step: &ItineraryStep) -> Self {
        Self {
            label: step.label.clone(),
            kind: step.transport.map(|k| k.to_string()),
            instruction: step.instruction().map(str::to_string),
            is_last: step.is_last(),
        }
    }
}
