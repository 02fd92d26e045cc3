//! Tests for typeahead fields.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::oneshot;

use super::*;
use crate::api::ApiError;
use crate::domain::location::fixtures::location;

/// In-memory lookup that records calls and can hold or fail chosen terms.
#[derive(Default)]
struct FakeLookup {
    locations: Vec<Location>,
    calls: StdMutex<Vec<String>>,
    gates: StdMutex<HashMap<String, oneshot::Receiver<()>>>,
    failing: HashSet<String>,
}

impl FakeLookup {
    fn with(codes: &[&str]) -> Self {
        Self {
            locations: codes
                .iter()
                .enumerate()
                .map(|(i, code)| location(i as i64 + 1, code))
                .collect(),
            ..Default::default()
        }
    }

    /// Hold lookups for `term` until the returned sender fires.
    fn hold(&self, term: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(term.to_string(), rx);
        tx
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl LocationLookup for Arc<FakeLookup> {
    async fn lookup(&self, term: &str, limit: u32) -> Result<Vec<Location>, ApiError> {
        self.calls.lock().unwrap().push(term.to_string());
        let gate = self.gates.lock().unwrap().remove(term);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.failing.contains(term) {
            return Err(ApiError::Server {
                status: 500,
                message: "lookup exploded".into(),
            });
        }
        let needle = term.to_lowercase();
        Ok(self
            .locations
            .iter()
            .filter(|l| {
                l.name.to_lowercase().contains(&needle)
                    || l.location_code.as_str().to_lowercase().contains(&needle)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

fn field(lookup: &Arc<FakeLookup>) -> Arc<TypeaheadField<Arc<FakeLookup>>> {
    Arc::new(TypeaheadField::new("origin", Arc::clone(lookup), Duration::ZERO, 10))
}

async fn wait_for_calls(lookup: &FakeLookup, n: usize) {
    while lookup.calls().len() < n {
        tokio::task::yield_now().await;
    }
}

fn codes(found: &[Location]) -> Vec<&str> {
    found.iter().map(|l| l.location_code.as_str()).collect()
}

#[tokio::test]
async fn empty_term_makes_no_network_call() {
    let lookup = Arc::new(FakeLookup::with(&["IST", "SAW"]));
    let field = field(&lookup);

    for raw in ["", "   ", "\t"] {
        assert_eq!(field.search(raw).await, LookupOutcome::Candidates(vec![]));
    }
    assert!(lookup.calls().is_empty());
}

#[tokio::test]
async fn non_empty_term_is_trimmed_and_looked_up() {
    let lookup = Arc::new(FakeLookup::with(&["IST", "SAW", "LHR"]));
    let field = field(&lookup);

    let LookupOutcome::Candidates(found) = field.search(" ist ").await else {
        panic!("lookup should commit");
    };
    assert_eq!(codes(&found), vec!["IST"]);
    assert_eq!(lookup.calls(), vec!["ist"]);

    let state = field.snapshot().await;
    assert_eq!(state.term, "ist");
    assert!(!state.loading);
}

#[tokio::test]
async fn clearing_drops_in_flight_lookup() {
    let lookup = Arc::new(FakeLookup::with(&["IST"]));
    let field = field(&lookup);
    let release = lookup.hold("IST");

    let f = Arc::clone(&field);
    let pending = tokio::spawn(async move { f.search("IST").await });
    wait_for_calls(&lookup, 1).await;

    // User deletes the term while the lookup is in flight
    assert_eq!(field.search("").await, LookupOutcome::Candidates(vec![]));

    release.send(()).unwrap();
    assert_eq!(pending.await.unwrap(), LookupOutcome::Superseded);
    assert!(field.candidates().await.is_empty());
    assert!(!field.snapshot().await.loading);
}

#[tokio::test]
async fn latest_keystroke_wins() {
    let lookup = Arc::new(FakeLookup::with(&["IST", "ISL"]));
    let field = field(&lookup);
    let release = lookup.hold("IS");

    let f = Arc::clone(&field);
    let slow = tokio::spawn(async move { f.search("IS").await });
    wait_for_calls(&lookup, 1).await;

    let LookupOutcome::Candidates(found) = field.search("IST").await else {
        panic!("latest keystroke should commit");
    };
    assert_eq!(codes(&found), vec!["IST"]);

    release.send(()).unwrap();
    assert_eq!(slow.await.unwrap(), LookupOutcome::Superseded);
    assert_eq!(codes(&field.candidates().await), vec!["IST"]);
}

#[tokio::test]
async fn failure_clears_candidates() {
    let lookup = Arc::new(FakeLookup {
        failing: HashSet::from(["LH".to_string()]),
        ..FakeLookup::with(&["LHR"])
    });
    let field = field(&lookup);

    field.search("LHR").await;
    assert_eq!(field.candidates().await.len(), 1);

    assert_eq!(field.search("LH").await, LookupOutcome::Candidates(vec![]));
    assert!(field.candidates().await.is_empty());
}

#[tokio::test]
async fn fields_are_independent() {
    let lookup = Arc::new(FakeLookup::with(&["IST", "LHR"]));
    let fields = Arc::new(EndpointFields::new(
        Arc::clone(&lookup),
        Duration::ZERO,
        10,
    ));
    let release = lookup.hold("IST");

    let f = Arc::clone(&fields);
    let origin = tokio::spawn(async move { f.origin.search("IST").await });
    wait_for_calls(&lookup, 1).await;

    // Destination completes while origin is still in flight
    fields.destination.search("LHR").await;

    release.send(()).unwrap();
    assert!(matches!(origin.await.unwrap(), LookupOutcome::Candidates(_)));

    assert_eq!(codes(&fields.origin.candidates().await), vec!["IST"]);
    assert_eq!(codes(&fields.destination.candidates().await), vec!["LHR"]);
}

#[tokio::test]
async fn select_is_by_identity() {
    // Two locations with the same label
    let mut twin = location(2, "IST");
    twin.city = String::new();
    let lookup = Arc::new(FakeLookup {
        locations: vec![location(1, "IST"), twin],
        ..Default::default()
    });
    let field = field(&lookup);
    field.search("IST").await;

    let picked = field.select(LocationId(2)).await.unwrap();
    assert_eq!(picked.id, LocationId(2));
    assert_eq!(field.selected().await.unwrap().id, LocationId(2));
    assert_eq!(field.snapshot().await.term, "IST Airport (IST)");

    // Unknown id leaves the selection alone
    assert!(field.select(LocationId(7)).await.is_none());
    assert_eq!(field.selected().await.unwrap().id, LocationId(2));
}

#[tokio::test]
async fn retyping_drops_selection() {
    let lookup = Arc::new(FakeLookup::with(&["IST", "LHR"]));
    let field = field(&lookup);
    field.search("IST").await;
    field.select(LocationId(1)).await.unwrap();

    // The selected label itself keeps the selection
    field.search(" IST Airport (IST) ").await;
    assert_eq!(field.selected().await.unwrap().id, LocationId(1));

    field.search("LH").await;
    assert!(field.selected().await.is_none());
    assert_eq!(field.snapshot().await.term, "LH");

    field.search("IST").await;
    field.select(LocationId(1)).await.unwrap();
    field.search("").await;
    assert!(field.selected().await.is_none());
}

#[tokio::test]
async fn clear_resets_everything() {
    let lookup = Arc::new(FakeLookup::with(&["IST"]));
    let field = field(&lookup);
    field.search("IST").await;
    field.select(LocationId(1)).await.unwrap();

    field.clear().await;
    assert_eq!(field.snapshot().await, FieldState::default());
}

#[tokio::test]
async fn selected_codes_feed_filters() {
    let lookup = Arc::new(FakeLookup::with(&["IST", "LHR"]));
    let fields = EndpointFields::new(Arc::clone(&lookup), Duration::ZERO, 10);

    fields.origin.search("IST").await;
    fields.origin.select(LocationId(1)).await.unwrap();

    let (origin, destination) = fields.selected_codes().await;
    assert_eq!(origin.unwrap().as_str(), "IST");
    assert!(destination.is_none());

    assert!(fields.field("origin").is_some());
    assert!(fields.field("via").is_none());
}

#[tokio::test(start_paused = true)]
async fn debounce_skips_superseded_keystrokes() {
    let lookup = Arc::new(FakeLookup::with(&["IST"]));
    let field = Arc::new(TypeaheadField::new(
        "origin",
        Arc::clone(&lookup),
        Duration::from_millis(250),
        10,
    ));

    let f = Arc::clone(&field);
    let first = tokio::spawn(async move { f.search("I").await });
    tokio::task::yield_now().await;
    let f = Arc::clone(&field);
    let second = tokio::spawn(async move { f.search("IS").await });
    tokio::task::yield_now().await;

    let third = field.search("IST").await;

    assert_eq!(first.await.unwrap(), LookupOutcome::Superseded);
    assert_eq!(second.await.unwrap(), LookupOutcome::Superseded);
    assert!(matches!(third, LookupOutcome::Candidates(ref c) if c.len() == 1));
    assert_eq!(lookup.calls(), vec!["IST"]);
}
