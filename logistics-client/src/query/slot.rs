//! Last-issued-wins bookkeeping for one query slot.
//!
//! Each resource view, typeahead field and route search owns a `QuerySlot`.
//! Issuing a fetch takes a [`Ticket`]; when the fetch resolves, its result may
//! only be committed if the ticket is still the slot's latest. A slow early
//! response that arrives after a faster later one is therefore dropped,
//! whether it succeeded or failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Sequence number of one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw sequence number, for logging.
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// A monotonically increasing request sequence for one slot.
#[derive(Debug, Default)]
pub struct QuerySlot {
    latest: AtomicU64,
}

impl QuerySlot {
    /// Create a slot with nothing issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Abandon interest in whatever is in flight without issuing a fetch.
    pub fn abandon(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}
