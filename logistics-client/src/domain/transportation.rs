//! Transportation (leg) types.

use serde::{Deserialize, Serialize};

use super::{DomainError, Location, LocationId, OperatingDays, TransportKind};

/// Opaque server-assigned identity of a transportation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransportationId(pub i64);

impl std::fmt::Display for TransportationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single scheduled leg between two locations.
///
/// The remote service guarantees origin and destination differ; this type
/// does not re-check it on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transportation {
    pub id: TransportationId,
    pub origin_location: Location,
    pub destination_location: Location,
    pub transportation_type: TransportKind,
    #[serde(default)]
    pub operating_days: OperatingDays,
}

impl Transportation {
    /// Returns the origin location.
    pub fn origin(&self) -> &Location {
        &self.origin_location
    }

    /// Returns the destination location.
    pub fn destination(&self) -> &Location {
        &self.destination_location
    }

    /// Returns the transport kind.
    pub fn kind(&self) -> TransportKind {
        self.transportation_type
    }
}

/// Reference to a location by id, as the remote service expects in
/// transportation payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRef {
    pub id: LocationId,
}

/// An unsaved transportation, as submitted by a create or update form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationDraft {
    pub origin_location: LocationRef,
    pub destination_location: LocationRef,
    pub transportation_type: TransportKind,
    #[serde(default)]
    pub operating_days: Vec<u8>,
}

impl TransportationDraft {
    /// Create a draft between two locations.
    pub fn new(
        origin: LocationId,
        destination: LocationId,
        kind: TransportKind,
        operating_days: Vec<u8>,
    ) -> Self {
        Self {
            origin_location: LocationRef { id: origin },
            destination_location: LocationRef { id: destination },
            transportation_type: kind,
            operating_days,
        }
    }

    /// Check the draft before it is sent.
    ///
    /// Origin and destination must differ and the operating days must be a
    /// valid weekday set. Returns the draft with days normalised to
    /// Monday-first order.
    pub fn validate(&self) -> Result<TransportationDraft, DomainError> {
        if self.origin_location.id == self.destination_location.id {
            return Err(DomainError::SameEndpoints(self.origin_location.id));
        }

        let days = OperatingDays::from_numbers(&self.operating_days)?;

        Ok(TransportationDraft {
            operating_days: days.numbers(),
            ..self.clone()
        })
    }
}

impl From<&Transportation> for TransportationDraft {
    fn from(t: &Transportation) -> Self {
        TransportationDraft::new(
            t.origin_location.id,
            t.destination_location.id,
            t.transportation_type,
            t.operating_days.numbers(),
        )
    }
}
