//! Per-field typeahead state.

use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::{Location, LocationCode, LocationId};
use crate::query::QuerySlot;

use super::lookup::LocationLookup;

/// What one field currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldState {
    /// The last trimmed term typed into the field.
    pub term: String,
    pub candidates: Vec<Location>,
    pub selected: Option<Location>,
    pub loading: bool,
}

/// Result of one keystroke's lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// The field's candidate list after this lookup. Empty for an empty
    /// term or a failed lookup.
    Candidates(Vec<Location>),
    /// A newer keystroke or a clear arrived first; nothing was committed.
    Superseded,
}

/// One typeahead input, e.g. "origin".
///
/// Each field has its own slot, so two fields edited concurrently never
/// see each other's results.
pub struct TypeaheadField<L> {
    name: &'static str,
    lookup: L,
    slot: QuerySlot,
    debounce: Duration,
    limit: u32,
    state: Mutex<FieldState>,
}

impl<L: LocationLookup> TypeaheadField<L> {
    /// Create an empty field.
    pub fn new(name: &'static str, lookup: L, debounce: Duration, limit: u32) -> Self {
        Self {
            name,
            lookup,
            slot: QuerySlot::new(),
            debounce,
            limit,
            state: Mutex::new(FieldState::default()),
        }
    }

    /// Field name, used in logs and routes.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Copy of the field's state.
    pub async fn snapshot(&self) -> FieldState {
        self.state.lock().await.clone()
    }

    /// Current candidates.
    pub async fn candidates(&self) -> Vec<Location> {
        self.state.lock().await.candidates.clone()
    }

    /// The selected location, if any.
    pub async fn selected(&self) -> Option<Location> {
        self.state.lock().await.selected.clone()
    }

    /// Handle one keystroke.
    ///
    /// A term that no longer matches the selected location's label drops
    /// the selection. A blank term clears the candidates at once, without a
    /// network call, and drops any lookup still in flight. Otherwise the field waits out
    /// the debounce and, if no newer keystroke arrived, looks the term up.
    /// Lookup failures leave the field with no suggestions.
    pub async fn search(&self, raw: &str) -> LookupOutcome {
        let term = raw.trim();

        let ticket = {
            let mut state = self.state.lock().await;
            state.term = term.to_string();
            // Retyping away from the selected label drops the selection
            if state.selected.as_ref().is_some_and(|s| s.label() != term) {
                state.selected = None;
            }
            if term.is_empty() {
                self.slot.abandon();
                state.candidates.clear();
                state.loading = false;
                return LookupOutcome::Candidates(Vec::new());
            }
            state.loading = true;
            self.slot.issue()
        };

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if !self.slot.is_current(ticket) {
                debug!(field = self.name, term, "keystroke superseded before lookup");
                return LookupOutcome::Superseded;
            }
        }

        let result = self.lookup.lookup(term, self.limit).await;

        let mut state = self.state.lock().await;
        if !self.slot.is_current(ticket) {
            debug!(field = self.name, term, seq = ticket.seq(), "discarding stale candidates");
            return LookupOutcome::Superseded;
        }
        state.loading = false;
        match result {
            Ok(found) => state.candidates = found,
            Err(e) => {
                warn!(field = self.name, term, error = %e, "location lookup failed");
                state.candidates.clear();
            }
        }
        LookupOutcome::Candidates(state.candidates.clone())
    }

    /// Select a candidate by identity.
    ///
    /// Returns the selected location, or `None` (leaving the selection
    /// unchanged) if no current candidate has that id.
    pub async fn select(&self, id: LocationId) -> Option<Location> {
        let mut state = self.state.lock().await;
        let picked = state.candidates.iter().find(|c| c.id == id).cloned()?;
        state.term = picked.label();
        state.selected = Some(picked.clone());
        Some(picked)
    }

    /// Drop the term, selection, candidates and any lookup in flight.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        self.slot.abandon();
        *state = FieldState::default();
    }
}

/// The origin/destination pair shared by the transportation filter and the
/// route search form.
pub struct EndpointFields<L> {
    pub origin: TypeaheadField<L>,
    pub destination: TypeaheadField<L>,
}

impl<L: LocationLookup + Clone> EndpointFields<L> {
    /// Create both fields over the same lookup.
    pub fn new(lookup: L, debounce: Duration, limit: u32) -> Self {
        Self {
            origin: TypeaheadField::new("origin", lookup.clone(), debounce, limit),
            destination: TypeaheadField::new("destination", lookup, debounce, limit),
        }
    }
}

impl<L: LocationLookup> EndpointFields<L> {
    /// Look a field up by name.
    pub fn field(&self, name: &str) -> Option<&TypeaheadField<L>> {
        match name {
            "origin" => Some(&self.origin),
            "destination" => Some(&self.destination),
            _ => None,
        }
    }

    /// Codes of the selected endpoints, for filters and route search.
    pub async fn selected_codes(&self) -> (Option<LocationCode>, Option<LocationCode>) {
        let origin = self.origin.selected().await.map(|l| l.location_code);
        let destination = self.destination.selected().await.map(|l| l.location_code);
        (origin, destination)
    }

    /// Clear both fields.
    pub async fn clear(&self) {
        self.origin.clear().await;
        self.destination.clear().await;
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
