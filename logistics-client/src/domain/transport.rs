//! Transport kinds and operating-day sets.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use super::DomainError;

/// The kind of vehicle serving a leg.
///
/// This enum is matched exhaustively wherever legs are rendered, so adding a
/// kind fails to compile until every renderer handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportKind {
    Flight,
    Bus,
    Subway,
    Uber,
}

impl TransportKind {
    /// All kinds, in the order the remote service declares them.
    pub const ALL: [TransportKind; 4] = [
        TransportKind::Flight,
        TransportKind::Bus,
        TransportKind::Subway,
        TransportKind::Uber,
    ];

    /// Wire name, e.g. `"FLIGHT"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportKind::Flight => "FLIGHT",
            TransportKind::Bus => "BUS",
            TransportKind::Subway => "SUBWAY",
            TransportKind::Uber => "UBER",
        }
    }

    /// Returns true for [`TransportKind::Flight`].
    pub fn is_flight(&self) -> bool {
        matches!(self, TransportKind::Flight)
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The weekdays a leg operates on.
///
/// Encoded on the wire as a JSON array of integers, 1 (Monday) through
/// 7 (Sunday). Order is irrelevant; duplicates and out-of-range values are
/// rejected. An empty set means the leg runs every day, which is how the
/// remote service treats a missing list.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OperatingDays(u8);

impl OperatingDays {
    /// A set with no days listed (runs daily).
    pub fn none() -> Self {
        Self(0)
    }

    /// Build a set from 1-based weekday numbers.
    pub fn from_numbers(days: &[u8]) -> Result<Self, DomainError> {
        let mut bits = 0u8;
        for &day in days {
            if !(1..=7).contains(&day) {
                return Err(DomainError::InvalidWeekday(day));
            }
            let bit = 1 << (day - 1);
            if bits & bit != 0 {
                return Err(DomainError::DuplicateWeekday(day));
            }
            bits |= bit;
        }
        Ok(Self(bits))
    }

    /// Returns true if the given weekday is listed.
    pub fn contains(&self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    /// Returns true if no days are listed.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the leg runs on the given calendar date.
    pub fn operates_on(&self, date: NaiveDate) -> bool {
        self.is_empty() || self.contains(date.weekday())
    }

    /// Listed days as 1-based numbers, Monday first.
    pub fn numbers(&self) -> Vec<u8> {
        (1..=7u8).filter(|d| self.0 & (1 << (d - 1)) != 0).collect()
    }
}

impl fmt::Debug for OperatingDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OperatingDays").field(&self.numbers()).finish()
    }
}

impl Serialize for OperatingDays {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.numbers().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OperatingDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let days = Option::<Vec<u8>>::deserialize(deserializer)?;
        match days {
            Some(days) => OperatingDays::from_numbers(&days).map_err(serde::de::Error::custom),
            None => Ok(OperatingDays::none()),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any subset of 1..=7 survives the wire encoding regardless of order
        #[test]
        fn subset_roundtrip(mut days in proptest::sample::subsequence(vec![1u8, 2, 3, 4, 5, 6, 7], 0..=7)) {
            days.reverse();
            let set = OperatingDays::from_numbers(&days).unwrap();
            let json = serde_json::to_string(&set).unwrap();
            let back: OperatingDays = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, set);
            days.sort_unstable();
            prop_assert_eq!(set.numbers(), days);
        }
    }
}
