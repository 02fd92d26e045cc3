//! Immutable query state and its transitions.
//!
//! A view's query state is never edited field by field. Each user action is
//! a [`QueryChange`]; [`QueryState::apply`] turns the old state and the change
//! into the next state plus, when the committed parameters moved, exactly one
//! set of [`FetchParams`] to load.

use serde::{Deserialize, Serialize};

use crate::api::SortDirection;

use super::resource::{Resource, Sort};

/// Errors from an invalid query change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Page size must be positive
    #[error("page size must be greater than zero")]
    ZeroPageSize,

    /// The resource has no search box
    #[error("{0} cannot be searched")]
    NotSearchable(&'static str),
}

/// Everything a list view remembers about what it is showing.
///
/// `draft` is the keystroke-local search text; only `search` (the committed
/// term) reaches the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct QueryState<R: Resource> {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort<R::SortField>>,
    pub draft: String,
    pub search: Option<String>,
    pub filter: R::Filter,
}

/// The committed subset of [`QueryState`]: what one fetch asks for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct FetchParams<R: Resource> {
    pub page: u32,
    pub size: u32,
    pub sort: Option<Sort<R::SortField>>,
    pub search: Option<String>,
    pub filter: R::Filter,
}

/// One user action on a list view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "change", rename_all = "camelCase", bound = "")]
pub enum QueryChange<R: Resource> {
    /// Go to a zero-based page. Sort, search and filters are kept.
    Page { page: u32 },
    /// Change rows per page. Sort, search and filters are kept.
    PageSize { size: u32 },
    /// Click a column header.
    Sort { field: R::SortField },
    /// Type into the search box (no fetch).
    EditDraft { text: String },
    /// Apply the draft as the search term.
    CommitSearch,
    /// Empty the search box, keeping the committed term.
    ClearDraft,
    /// Drop the committed term and empty the search box.
    ClearSearch,
    /// Replace the committed filters.
    Filter { filter: R::Filter },
    /// Drop all filters.
    ResetFilter,
    /// Re-fetch the current parameters.
    Refresh,
}

/// Result of applying a change.
#[derive(Debug, Clone)]
pub struct Transition<R: Resource> {
    pub state: QueryState<R>,
    /// Present when exactly one fetch must be issued.
    pub fetch: Option<FetchParams<R>>,
}

impl<R: Resource> QueryState<R> {
    /// State on view mount: first page, default sort, no search or filters.
    pub fn new(size: u32) -> Result<Self, QueryError> {
        if size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        Ok(Self {
            page: 0,
            size,
            sort: R::default_sort(),
            draft: String::new(),
            search: None,
            filter: R::Filter::default(),
        })
    }

    /// The committed parameters.
    pub fn fetch_params(&self) -> FetchParams<R> {
        FetchParams {
            page: self.page,
            size: self.size,
            sort: self.sort,
            search: self.search.clone(),
            filter: self.filter.clone(),
        }
    }

    /// Compute the next state for `change`.
    ///
    /// Sort, search and filter changes reset the page index to 0; page and
    /// page-size changes keep everything else. A fetch is requested when the
    /// committed parameters differ from the current ones, or on `Refresh`.
    pub fn apply(&self, change: QueryChange<R>) -> Result<Transition<R>, QueryError> {
        let mut next = self.clone();
        let force = matches!(change, QueryChange::Refresh);

        match change {
            QueryChange::Page { page } => next.page = page,
            QueryChange::PageSize { size } => {
                if size == 0 {
                    return Err(QueryError::ZeroPageSize);
                }
                next.size = size;
            }
            QueryChange::Sort { field } => {
                next.sort = Some(toggle_sort(self.sort, field));
                next.page = 0;
            }
            QueryChange::EditDraft { text } => {
                ensure_searchable::<R>()?;
                next.draft = text;
            }
            QueryChange::CommitSearch => {
                ensure_searchable::<R>()?;
                next.search = normalize_term(&next.draft);
                next.page = 0;
            }
            QueryChange::ClearDraft => {
                ensure_searchable::<R>()?;
                next.draft.clear();
                next.page = 0;
            }
            QueryChange::ClearSearch => {
                ensure_searchable::<R>()?;
                next.draft.clear();
                next.search = None;
                next.page = 0;
            }
            QueryChange::Filter { filter } => {
                next.filter = filter;
                next.page = 0;
            }
            QueryChange::ResetFilter => {
                next.filter = R::Filter::default();
                next.page = 0;
            }
            QueryChange::Refresh => {}
        }

        let params = next.fetch_params();
        let fetch = (force || params != self.fetch_params()).then_some(params);

        Ok(Transition { state: next, fetch })
    }
}

/// Same field: flip direction. Other field: switch to it, ascending.
fn toggle_sort<F: Copy + Eq>(current: Option<Sort<F>>, field: F) -> Sort<F> {
    match current {
        Some(active) if active.field == field => Sort {
            field,
            direction: active.direction.reversed(),
        },
        _ => Sort {
            field,
            direction: SortDirection::Asc,
        },
    }
}

fn normalize_term(draft: &str) -> Option<String> {
    let trimmed = draft.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn ensure_searchable<R: Resource>() -> Result<(), QueryError> {
    if R::SEARCHABLE {
        Ok(())
    } else {
        Err(QueryError::NotSearchable(R::NAME))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::api::LocationSortField;
    use crate::domain::LocationCode;
    use crate::query::resource::{Locations, TransportationFilter, Transportations};

    fn locations() -> QueryState<Locations> {
        QueryState::new(10).unwrap()
    }

    fn apply(state: &QueryState<Locations>, change: QueryChange<Locations>) -> Transition<Locations> {
        state.apply(change).unwrap()
    }

    #[test]
    fn mount_defaults() {
        let state = locations();
        assert_eq!(state.page, 0);
        assert_eq!(state.size, 10);
        assert_eq!(
            state.sort,
            Some(Sort {
                field: LocationSortField::Id,
                direction: SortDirection::Asc
            })
        );
        assert!(state.search.is_none());

        let state = QueryState::<Transportations>::new(25).unwrap();
        assert!(state.sort.is_none());
        assert!(state.filter.is_empty());

        assert_eq!(
            QueryState::<Locations>::new(0).unwrap_err(),
            QueryError::ZeroPageSize
        );
    }

    #[test]
    fn sort_same_ascending_field_toggles_to_descending() {
        let state = locations();
        let t = apply(&state, QueryChange::Sort { field: LocationSortField::Id });
        assert_eq!(t.state.sort.unwrap().direction, SortDirection::Desc);
        assert!(t.fetch.is_some());

        // And back again
        let t = apply(&t.state, QueryChange::Sort { field: LocationSortField::Id });
        assert_eq!(t.state.sort.unwrap().direction, SortDirection::Asc);
    }

    #[test]
    fn sort_other_field_resets_to_ascending() {
        let state = locations();
        let desc = apply(&state, QueryChange::Sort { field: LocationSortField::Id }).state;
        let t = apply(&desc, QueryChange::Sort { field: LocationSortField::Name });
        let sort = t.state.sort.unwrap();
        assert_eq!(sort.field, LocationSortField::Name);
        assert_eq!(sort.direction, SortDirection::Asc);
    }

    #[test]
    fn sort_change_resets_page() {
        let on_page_3 = apply(&locations(), QueryChange::Page { page: 3 }).state;
        assert_eq!(on_page_3.page, 3);

        let t = apply(&on_page_3, QueryChange::Sort { field: LocationSortField::City });
        assert_eq!(t.state.page, 0);
        assert_eq!(t.fetch.unwrap().page, 0);
    }

    #[test]
    fn page_size_keeps_sort_search_and_page() {
        let mut state = locations();
        state = apply(&state, QueryChange::Sort { field: LocationSortField::Name }).state;
        state = apply(&state, QueryChange::EditDraft { text: "ist".into() }).state;
        state = apply(&state, QueryChange::CommitSearch).state;
        state = apply(&state, QueryChange::Page { page: 2 }).state;

        let t = apply(&state, QueryChange::PageSize { size: 50 });
        assert_eq!(t.state.size, 50);
        assert_eq!(t.state.page, 2);
        assert_eq!(t.state.sort, state.sort);
        assert_eq!(t.state.search.as_deref(), Some("ist"));
        assert!(t.fetch.is_some());
    }

    #[test]
    fn zero_page_size_rejected() {
        let result = locations().apply(QueryChange::PageSize { size: 0 });
        assert_eq!(result.unwrap_err(), QueryError::ZeroPageSize);
    }

    #[test]
    fn draft_edit_does_not_fetch() {
        let t = apply(&locations(), QueryChange::EditDraft { text: "NY".into() });
        assert_eq!(t.state.draft, "NY");
        assert!(t.state.search.is_none());
        assert!(t.fetch.is_none());
    }

    #[test]
    fn commit_search_fetches_first_page() {
        let state = apply(&locations(), QueryChange::Page { page: 4 }).state;
        let state = apply(&state, QueryChange::EditDraft { text: " NYC ".into() }).state;
        let t = apply(&state, QueryChange::CommitSearch);

        let fetch = t.fetch.unwrap();
        assert_eq!(fetch.search.as_deref(), Some("NYC"));
        assert_eq!(fetch.page, 0);
    }

    #[test]
    fn clear_draft_keeps_committed_term() {
        let mut state = locations();
        state = apply(&state, QueryChange::EditDraft { text: "NYC".into() }).state;
        state = apply(&state, QueryChange::CommitSearch).state;
        state = apply(&state, QueryChange::Page { page: 1 }).state;

        let t = apply(&state, QueryChange::ClearDraft);
        assert_eq!(t.state.draft, "");
        assert_eq!(t.state.search.as_deref(), Some("NYC"));
        assert_eq!(t.state.page, 0);
        assert!(t.fetch.is_some());
    }

    #[test]
    fn clear_search_drops_term_and_draft() {
        let mut state = locations();
        state = apply(&state, QueryChange::EditDraft { text: "NYC".into() }).state;
        state = apply(&state, QueryChange::CommitSearch).state;

        let t = apply(&state, QueryChange::ClearSearch);
        assert_eq!(t.state.draft, "");
        assert!(t.state.search.is_none());
        assert_eq!(t.state.page, 0);
        assert!(t.fetch.unwrap().search.is_none());
    }

    #[test]
    fn unchanged_parameters_do_not_fetch() {
        let state = locations();
        assert!(apply(&state, QueryChange::Page { page: 0 }).fetch.is_none());
        assert!(apply(&state, QueryChange::ClearSearch).fetch.is_none());
        assert!(apply(&state, QueryChange::Refresh).fetch.is_some());
    }

    #[test]
    fn filters_reset_page_and_fetch() {
        let state = QueryState::<Transportations>::new(10).unwrap();
        let state = state.apply(QueryChange::Page { page: 2 }).unwrap().state;

        let filter = TransportationFilter {
            origin: Some(LocationCode::parse("IST").unwrap()),
            destination: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 3),
        };
        let t = state
            .apply(QueryChange::Filter {
                filter: filter.clone(),
            })
            .unwrap();
        assert_eq!(t.state.page, 0);
        assert_eq!(t.fetch.unwrap().filter, filter);

        let t = t.state.apply(QueryChange::ResetFilter).unwrap();
        assert!(t.state.filter.is_empty());
        assert!(t.fetch.is_some());
    }

    #[test]
    fn transportations_reject_search() {
        let state = QueryState::<Transportations>::new(10).unwrap();
        assert_eq!(
            state.apply(QueryChange::CommitSearch).unwrap_err(),
            QueryError::NotSearchable("transportations")
        );
    }

    #[test]
    fn change_json_shape() {
        let change: QueryChange<Locations> =
            serde_json::from_str(r#"{"change":"sort","field":"locationCode"}"#).unwrap();
        assert_eq!(
            change,
            QueryChange::Sort {
                field: LocationSortField::LocationCode
            }
        );

        let change: QueryChange<Locations> =
            serde_json::from_str(r#"{"change":"commitSearch"}"#).unwrap();
        assert_eq!(change, QueryChange::CommitSearch);

        // Transportations have no sortable fields at all
        assert!(
            serde_json::from_str::<QueryChange<Transportations>>(r#"{"change":"sort","field":"id"}"#)
                .is_err()
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::api::LocationSortField;
    use crate::query::resource::Locations;
    use proptest::prelude::*;

    fn sort_field() -> impl Strategy<Value = LocationSortField> {
        prop_oneof![
            Just(LocationSortField::Id),
            Just(LocationSortField::Name),
            Just(LocationSortField::LocationCode),
            Just(LocationSortField::Country),
            Just(LocationSortField::City),
        ]
    }

    fn change() -> impl Strategy<Value = QueryChange<Locations>> {
        prop_oneof![
            (0u32..20).prop_map(|page| QueryChange::Page { page }),
            (1u32..100).prop_map(|size| QueryChange::PageSize { size }),
            sort_field().prop_map(|field| QueryChange::Sort { field }),
            "[a-z ]{0,6}".prop_map(|text| QueryChange::EditDraft { text }),
            Just(QueryChange::CommitSearch),
            Just(QueryChange::ClearDraft),
            Just(QueryChange::ClearSearch),
            Just(QueryChange::Refresh),
        ]
    }

    proptest! {
        /// Any sequence of changes keeps the state well-formed, and a fetch,
        /// when requested, always asks for exactly the committed parameters
        #[test]
        fn fetch_matches_committed_state(changes in proptest::collection::vec(change(), 1..30)) {
            let mut state = QueryState::<Locations>::new(10).unwrap();
            for change in changes {
                let resets_page = matches!(
                    change,
                    QueryChange::Sort { .. }
                        | QueryChange::CommitSearch
                        | QueryChange::ClearDraft
                        | QueryChange::ClearSearch
                );
                let t = state.apply(change).unwrap();
                if resets_page {
                    prop_assert_eq!(t.state.page, 0);
                }
                if let Some(fetch) = &t.fetch {
                    prop_assert_eq!(fetch, &t.state.fetch_params());
                }
                prop_assert!(t.state.size > 0);
                prop_assert!(t.state.sort.is_some());
                state = t.state;
            }
        }
    }
}
