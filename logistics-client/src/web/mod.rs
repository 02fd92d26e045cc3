//! Web layer for the logistics planner client.
//!
//! Serves the list views, typeahead fields and mutations as JSON, and the
//! route search results as an HTML itinerary page.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
