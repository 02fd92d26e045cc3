//! Route type.
//!
//! A `Route` is an ordered chain of transportation legs from an overall
//! origin to an overall destination, as returned by the remote route search.

use chrono::NaiveDate;

use super::{DomainError, Location, Transportation};

/// A contiguous chain of legs.
///
/// # Invariants
///
/// - At least one leg
/// - Consecutive legs connect: `legs[i].destination == legs[i + 1].origin`,
///   compared by location identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    legs: Vec<Transportation>,
}

impl Route {
    /// Constructs a route, checking the chain.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - Legs list is empty
    /// - Two consecutive legs don't meet at the same location
    ///
    /// # Examples
    ///
    /// ```
    /// use logistics_client::domain::{Location, LocationCode, LocationId, OperatingDays, Route,
    ///     TransportKind, Transportation, TransportationId};
    ///
    /// let place = |id, code: &str| Location {
    ///     id: LocationId(id),
    ///     name: code.to_string(),
    ///     country: "TR".into(),
    ///     city: code.to_string(),
    ///     location_code: LocationCode::parse(code).unwrap(),
    /// };
    ///
    /// let leg = Transportation {
    ///     id: TransportationId(1),
    ///     origin_location: place(1, "IST"),
    ///     destination_location: place(2, "LHR"),
    ///     transportation_type: TransportKind::Flight,
    ///     operating_days: OperatingDays::none(),
    /// };
    ///
    /// let route = Route::new(vec![leg]).unwrap();
    /// assert_eq!(route.leg_count(), 1);
    /// assert_eq!(route.destination().location_code.as_str(), "LHR");
    /// ```
    pub fn new(legs: Vec<Transportation>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        for (i, window) in legs.windows(2).enumerate() {
            let arrive = window[0].destination();
            let depart = window[1].origin();
            if !arrive.same_entity(depart) {
                return Err(DomainError::BrokenChain {
                    position: i + 1,
                    expected: arrive.location_code.clone(),
                    found: depart.location_code.clone(),
                });
            }
        }

        Ok(Route { legs })
    }

    /// Returns all legs in order.
    pub fn legs(&self) -> &[Transportation] {
        &self.legs
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the overall origin (first leg's origin).
    pub fn origin(&self) -> &Location {
        // Safe: validated non-empty at construction
        self.legs[0].origin()
    }

    /// Returns the overall destination (last leg's destination).
    pub fn destination(&self) -> &Location {
        // Safe: validated non-empty at construction
        self.legs[self.legs.len() - 1].destination()
    }

    /// True if every leg runs on `date`.
    pub fn operates_on(&self, date: NaiveDate) -> bool {
        self.legs.iter().all(|leg| leg.operating_days.operates_on(date))
    }
}
