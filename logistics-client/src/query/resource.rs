//! Resource kinds a list view can show, and the seam to fetch them.

use std::fmt;
use std::future::Future;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{
    ApiClient, ApiError, LocationListParams, LocationSortField, Page, TransportationListParams,
};
use crate::domain::{
    Location, LocationCode, LocationDraft, LocationId, Transportation, TransportationDraft,
    TransportationId,
};

use super::state::FetchParams;

/// A kind of entity that can be listed page by page.
///
/// Implementors are marker types; the associated types say what a page
/// contains, which columns are sortable and which filters apply.
pub trait Resource:
    fmt::Debug + Clone + Copy + PartialEq + Eq + Default + Send + Sync + 'static
{
    /// One row of the list.
    type Item: Clone + fmt::Debug + PartialEq + Serialize + Send + Sync + 'static;

    /// Allow-listed sort columns. An uninhabited type means "not sortable".
    type SortField: Copy + Eq + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Filter fields. Every field is independently optional.
    type Filter: Clone
        + Default
        + PartialEq
        + fmt::Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    /// Identity of one stored row.
    type Id: Copy + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Payload for create and update.
    type Draft: fmt::Debug + Send + Sync + 'static;

    /// Name used in logs.
    const NAME: &'static str;

    /// Whether the view offers a free-text search box.
    const SEARCHABLE: bool;

    /// Sort applied when the view mounts.
    fn default_sort() -> Option<Sort<Self::SortField>>;
}

/// The active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort<F> {
    pub field: F,
    pub direction: crate::api::SortDirection,
}

/// Where a coordinator gets its pages and sends its mutations.
///
/// [`ApiClient`] implements this for every resource; tests substitute
/// scripted sources to control completion order.
pub trait ResourceSource<R: Resource>: Send + Sync {
    /// Fetch one page for the given committed parameters.
    fn fetch_page(
        &self,
        params: &FetchParams<R>,
    ) -> impl Future<Output = Result<Page<R::Item>, ApiError>> + Send;

    /// Create a row.
    fn create(&self, draft: &R::Draft) -> impl Future<Output = Result<R::Item, ApiError>> + Send;

    /// Replace a row.
    fn update(
        &self,
        id: R::Id,
        draft: &R::Draft,
    ) -> impl Future<Output = Result<R::Item, ApiError>> + Send;

    /// Delete a row.
    fn delete(&self, id: R::Id) -> impl Future<Output = Result<(), ApiError>> + Send;
}

// ----------------------------------------------------------------------------
// Locations
// ----------------------------------------------------------------------------

/// The location list: sortable by any column, searchable by name or code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Locations;

/// Locations have no structured filters; search covers name and code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoFilter {}

impl Resource for Locations {
    type Item = Location;
    type SortField = LocationSortField;
    type Filter = NoFilter;
    type Id = LocationId;
    type Draft = LocationDraft;

    const NAME: &'static str = "locations";
    const SEARCHABLE: bool = true;

    fn default_sort() -> Option<Sort<LocationSortField>> {
        Some(Sort {
            field: LocationSortField::Id,
            direction: crate::api::SortDirection::Asc,
        })
    }
}

impl From<&FetchParams<Locations>> for LocationListParams {
    fn from(params: &FetchParams<Locations>) -> Self {
        Self {
            page: params.page,
            size: params.size,
            sort: params.sort.map(|s| (s.field, s.direction)),
            search: params.search.clone(),
        }
    }
}

impl ResourceSource<Locations> for ApiClient {
    async fn fetch_page(&self, params: &FetchParams<Locations>) -> Result<Page<Location>, ApiError> {
        self.list_locations(&LocationListParams::from(params)).await
    }

    async fn create(&self, draft: &LocationDraft) -> Result<Location, ApiError> {
        self.create_location(draft).await
    }

    async fn update(&self, id: LocationId, draft: &LocationDraft) -> Result<Location, ApiError> {
        self.update_location(id, draft).await
    }

    async fn delete(&self, id: LocationId) -> Result<(), ApiError> {
        self.delete_location(id).await
    }
}

// ----------------------------------------------------------------------------
// Transportations
// ----------------------------------------------------------------------------

/// The transportation list: unsorted, filtered by endpoints and date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transportations;

/// A sort field type with no values: the list cannot be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unsorted {}

/// Committed transportation filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationFilter {
    #[serde(default)]
    pub origin: Option<LocationCode>,
    #[serde(default)]
    pub destination: Option<LocationCode>,
    /// Only legs operating on this date's weekday.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl TransportationFilter {
    /// Returns true if no filter field is set.
    pub fn is_empty(&self) -> bool {
        self.origin.is_none() && self.destination.is_none() && self.date.is_none()
    }
}

impl Resource for Transportations {
    type Item = Transportation;
    type SortField = Unsorted;
    type Filter = TransportationFilter;
    type Id = TransportationId;
    type Draft = TransportationDraft;

    const NAME: &'static str = "transportations";
    const SEARCHABLE: bool = false;

    fn default_sort() -> Option<Sort<Unsorted>> {
        None
    }
}

impl From<&FetchParams<Transportations>> for TransportationListParams {
    fn from(params: &FetchParams<Transportations>) -> Self {
        Self {
            page: params.page,
            size: params.size,
            origin: params.filter.origin.clone(),
            destination: params.filter.destination.clone(),
            date: params.filter.date,
        }
    }
}

impl ResourceSource<Transportations> for ApiClient {
    async fn fetch_page(
        &self,
        params: &FetchParams<Transportations>,
    ) -> Result<Page<Transportation>, ApiError> {
        self.list_transportations(&TransportationListParams::from(params))
            .await
    }

    async fn create(&self, draft: &TransportationDraft) -> Result<Transportation, ApiError> {
        self.create_transportation(draft).await
    }

    async fn update(
        &self,
        id: TransportationId,
        draft: &TransportationDraft,
    ) -> Result<Transportation, ApiError> {
        self.update_transportation(id, draft).await
    }

    async fn delete(&self, id: TransportationId) -> Result<(), ApiError> {
        self.delete_transportation(id).await
    }
}
