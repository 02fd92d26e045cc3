//! Typeahead lookups for location inputs.
//!
//! Forms that reference a location (transportation origin/destination, route
//! search endpoints) look candidates up as the user types. Each input is an
//! independent [`TypeaheadField`] with its own last-issued-wins slot, and
//! lookup failures degrade to "no suggestions" rather than blocking the form.

mod field;
mod lookup;

pub use field::{EndpointFields, FieldState, LookupOutcome, TypeaheadField};
pub use lookup::LocationLookup;
