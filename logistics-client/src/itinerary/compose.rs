//! Route to itinerary expansion.
//!
//! Pure functions over a [`Route`]: [`compose`] lists the waypoints a
//! traveller passes through, and [`select_via_point`] picks the transfer
//! point shown in route summaries.

use serde::Serialize;

use crate::domain::{Location, LocationCode, Route, TransportKind};

/// One waypoint of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryStep {
    /// `"{name} ({code})"` of the waypoint.
    pub label: String,
    pub location_code: LocationCode,
    /// Kind of the leg leaving this waypoint; `None` on the final step.
    pub transport: Option<TransportKind>,
}

impl ItineraryStep {
    fn at(location: &Location, transport: Option<TransportKind>) -> Self {
        Self {
            label: location.label(),
            location_code: location.location_code.clone(),
            transport,
        }
    }

    /// True for the arrival step.
    pub fn is_last(&self) -> bool {
        self.transport.is_none()
    }

    /// Human instruction for the outgoing leg, e.g. "Take the bus".
    pub fn instruction(&self) -> Option<&'static str> {
        self.transport.map(instruction)
    }
}

/// Expand a route of N legs into N + 1 steps.
///
/// Step `i < N` is leg `i`'s origin with leg `i`'s kind; step `N` is the last
/// leg's destination with no kind. Contiguity is guaranteed by [`Route`], so
/// every intermediate step is both an arrival and a departure.
///
/// # Examples
///
/// ```
/// use logistics_client::domain::{Location, LocationCode, LocationId, OperatingDays, Route,
///     TransportKind, Transportation, TransportationId};
/// use logistics_client::itinerary::compose;
///
/// let place = |id, code: &str| Location {
///     id: LocationId(id),
///     name: format!("{code} Airport"),
///     country: "TR".into(),
///     city: code.to_string(),
///     location_code: LocationCode::parse(code).unwrap(),
/// };
/// let route = Route::new(vec![Transportation {
///     id: TransportationId(1),
///     origin_location: place(1, "SAW"),
///     destination_location: place(2, "ESB"),
///     transportation_type: TransportKind::Flight,
///     operating_days: OperatingDays::none(),
/// }])
/// .unwrap();
///
/// let steps = compose(&route);
/// assert_eq!(steps.len(), 2);
/// assert_eq!(steps[0].label, "SAW Airport (SAW)");
/// assert_eq!(steps[0].transport, Some(TransportKind::Flight));
/// assert_eq!(steps[1].transport, None);
/// ```
pub fn compose(route: &Route) -> Vec<ItineraryStep> {
    let legs = route.legs();
    let mut steps: Vec<ItineraryStep> = legs
        .iter()
        .map(|leg| ItineraryStep::at(leg.origin(), Some(leg.kind())))
        .collect();
    steps.push(ItineraryStep::at(route.destination(), None));
    steps
}

/// The "via" point of a route: the destination of its first FLIGHT leg.
///
/// This is a first-match rule in sequence order, not a search for the most
/// significant transfer. A route with several flights reports the first
/// one's destination; a route with no flight has no via point.
pub fn select_via_point(route: &Route) -> Option<&Location> {
    route
        .legs()
        .iter()
        .find(|leg| leg.kind().is_flight())
        .map(|leg| leg.destination())
}

/// Display phrase for travelling on a leg of `kind`.
pub fn instruction(kind: TransportKind) -> &'static str {
    match kind {
        TransportKind::Flight => "Fly",
        TransportKind::Bus => "Take the bus",
        TransportKind::Subway => "Take the subway",
        TransportKind::Uber => "Ride an Uber",
    }
}

/// One-line summary of a route, as shown in search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub origin: Location,
    pub destination: Location,
    pub via: Option<Location>,
    pub leg_count: usize,
}

impl RouteSummary {
    /// Summarise `route`.
    pub fn of(route: &Route) -> Self {
        Self {
            origin: route.origin().clone(),
            destination: route.destination().clone(),
            via: select_via_point(route).cloned(),
            leg_count: route.leg_count(),
        }
    }

    /// `"Via {name} ({code})"`, or `None` when the route has no flight.
    pub fn via_label(&self) -> Option<String> {
        self.via.as_ref().map(|via| format!("Via {}", via.label()))
    }
}
