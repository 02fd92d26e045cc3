//! Query parameters for list and search endpoints.
//!
//! Absent or empty optional parameters are never sent, so they never
//! constrain the remote query.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::LocationCode;

/// Sort direction, sent as `ASC` / `DESC`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Wire value for the `sortOrder` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }

    /// The opposite direction.
    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Columns the location list may be sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocationSortField {
    #[default]
    Id,
    Name,
    LocationCode,
    Country,
    City,
}

impl LocationSortField {
    /// Wire value for the `sortBy` parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            LocationSortField::Id => "id",
            LocationSortField::Name => "name",
            LocationSortField::LocationCode => "locationCode",
            LocationSortField::Country => "country",
            LocationSortField::City => "city",
        }
    }
}

impl fmt::Display for LocationSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Serialize a calendar date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parameters for `GET /locations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationListParams {
    pub page: u32,
    pub size: u32,
    pub sort: Option<(LocationSortField, SortDirection)>,
    pub search: Option<String>,
}

impl LocationListParams {
    /// First page of a name/code search, in server default order.
    pub fn search(term: impl Into<String>, size: u32) -> Self {
        Self {
            page: 0,
            size,
            sort: None,
            search: Some(term.into()),
        }
    }

    /// Query-string pairs, omitting absent values.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some((field, direction)) = self.sort {
            query.push(("sortBy", field.as_param().to_string()));
            query.push(("sortOrder", direction.as_param().to_string()));
        }
        if let Some(search) = non_empty(self.search.as_deref()) {
            query.push(("search", search.to_string()));
        }
        query
    }
}

/// Parameters for `GET /transportations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportationListParams {
    pub page: u32,
    pub size: u32,
    pub origin: Option<LocationCode>,
    pub destination: Option<LocationCode>,
    pub date: Option<NaiveDate>,
}

impl TransportationListParams {
    /// Query-string pairs, omitting absent filters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(origin) = &self.origin {
            query.push(("originLocationCode", origin.to_string()));
        }
        if let Some(destination) = &self.destination {
            query.push(("destinationLocationCode", destination.to_string()));
        }
        if let Some(date) = self.date {
            query.push(("date", format_date(date)));
        }
        query.push(("page", self.page.to_string()));
        query.push(("size", self.size.to_string()));
        query
    }
}

/// Parameters for `GET /routes/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSearchRequest {
    pub origin: LocationCode,
    pub destination: LocationCode,
    pub date: NaiveDate,
}

impl RouteSearchRequest {
    /// Create a search for a specific date.
    pub fn new(origin: LocationCode, destination: LocationCode, date: NaiveDate) -> Self {
        Self {
            origin,
            destination,
            date,
        }
    }

    /// Create a search for today's local date.
    pub fn today(origin: LocationCode, destination: LocationCode) -> Self {
        Self::new(origin, destination, Local::now().date_naive())
    }

    /// Query-string pairs.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("originLocationCode", self.origin.to_string()),
            ("destinationLocationCode", self.destination.to_string()),
            ("date", format_date(self.date)),
        ]
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
