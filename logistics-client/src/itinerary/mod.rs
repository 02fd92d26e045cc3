//! Route search results and their itineraries.
//!
//! The remote service finds routes; this module turns each returned
//! [`Route`](crate::domain::Route) into display-ready steps and a summary,
//! and keeps the route search view consistent when searches overlap.

mod compose;
mod search;

pub use compose::{ItineraryStep, RouteSummary, compose, instruction, select_via_point};
pub use search::{ComposedRoute, RouteFinder, RouteSearch, RouteSearchState};
