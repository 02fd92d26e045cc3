//! Domain error types.
//!
//! These errors represent validation failures and broken invariants in the
//! domain layer. They are distinct from API/IO errors.

use super::{LocationCode, LocationId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A form field failed validation
    #[error("validation failed: {0}")]
    Validation(String),

    /// Weekday number outside 1..=7
    #[error("invalid weekday {0}: must be 1 (Monday) to 7 (Sunday)")]
    InvalidWeekday(u8),

    /// Weekday listed more than once
    #[error("weekday {0} listed more than once")]
    DuplicateWeekday(u8),

    /// A leg would start and end at the same location
    #[error("origin and destination must differ (both are location {0})")]
    SameEndpoints(LocationId),

    /// Route has no legs
    #[error("route must have at least one leg")]
    EmptyRoute,

    /// Consecutive legs don't meet at the same location
    #[error("leg {position} departs from {found} but the previous leg arrives at {expected}")]
    BrokenChain {
        position: usize,
        expected: LocationCode,
        found: LocationCode,
    },
}
