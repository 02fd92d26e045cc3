//! Server-driven list views.
//!
//! Each list view (locations, transportations) is a [`QueryCoordinator`]
//! over an immutable [`QueryState`]. User actions become [`QueryChange`]s;
//! a change that moves the committed parameters issues exactly one fetch,
//! and only the most recently issued fetch may replace the visible page.

mod coordinator;
mod resource;
mod slot;
mod state;

pub use coordinator::{LoadOutcome, QueryCoordinator, ViewSnapshot};
pub use resource::{
    Locations, NoFilter, Resource, ResourceSource, Sort, TransportationFilter, Transportations,
    Unsorted,
};
pub use slot::{QuerySlot, Ticket};
pub use state::{FetchParams, QueryChange, QueryError, QueryState, Transition};
