//! The entity-search capability a typeahead field queries.

use std::future::Future;

use tracing::debug;

use crate::api::{ApiClient, ApiError, LocationListParams};
use crate::domain::Location;

/// Finds locations whose name or code matches a partial term.
pub trait LocationLookup: Send + Sync {
    /// Return at most `limit` candidates for a non-empty, trimmed `term`.
    fn lookup(
        &self,
        term: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Location>, ApiError>> + Send;
}

impl LocationLookup for ApiClient {
    async fn lookup(&self, term: &str, limit: u32) -> Result<Vec<Location>, ApiError> {
        let page = self
            .list_locations(&LocationListParams::search(term, limit))
            .await?;
        debug!(term, found = page.total_elements, "location lookup");
        Ok(page.content)
    }
}
