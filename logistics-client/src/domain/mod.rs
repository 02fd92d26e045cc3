//! Domain types for the logistics planner client.
//!
//! This module contains the records the remote service stores (locations and
//! transportations) and the routes its search returns. Types that carry an
//! invariant enforce it at construction time, so code that receives them can
//! trust their validity.

mod error;
pub(crate) mod location;
mod route;
mod transport;
pub(crate) mod transportation;

pub use error::DomainError;
pub use location::{InvalidLocationCode, Location, LocationCode, LocationDraft, LocationId};
pub use route::Route;
pub use transport::{OperatingDays, TransportKind};
pub use transportation::{LocationRef, Transportation, TransportationDraft, TransportationId};
