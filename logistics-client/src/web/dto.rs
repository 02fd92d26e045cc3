//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::LocationId;

/// Query for a typeahead lookup.
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    /// Raw text typed into the field
    #[serde(default)]
    pub q: String,
}

/// Request to select a typeahead candidate.
#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    /// Identity of the candidate
    pub id: LocationId,
}

/// Query for the route search page.
///
/// With neither endpoint the page shows the empty form; with both it
/// searches. A date defaults to today.
#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    /// Origin location code
    #[serde(default)]
    pub origin: Option<String>,

    /// Destination location code
    #[serde(default)]
    pub destination: Option<String>,

    /// Travel date (YYYY-MM-DD). HTML forms send an empty string when
    /// the date is left blank.
    #[serde(default)]
    pub date: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
