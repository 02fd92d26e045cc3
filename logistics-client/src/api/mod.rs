//! Planner API client.
//!
//! This module provides an HTTP client for the remote planner service, which
//! owns persistence, validation and the route-finding algorithm.
//!
//! Key characteristics of the service:
//! - Every response is wrapped as `{ success, message, data }`
//! - List endpoints return server-computed pages (Spring `Page` shape)
//! - Dates are `YYYY-MM-DD`; weekdays are 1 (Monday) through 7 (Sunday)

mod client;
mod envelope;
mod error;
mod page;
mod params;

pub use client::{ApiClient, ApiConfig, DEFAULT_BASE_URL};
pub use envelope::ApiResponse;
pub use error::ApiError;
pub use page::{Page, total_pages_for};
pub use params::{
    LocationListParams, LocationSortField, RouteSearchRequest, SortDirection,
    TransportationListParams, format_date,
};
