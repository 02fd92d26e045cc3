//! Logistics planner client.
//!
//! The client half of an aviation logistics planner: server-driven list
//! views over locations and transportations, typeahead location lookups,
//! and route search results expanded into itineraries. Route finding,
//! persistence and validation belong to the remote planner API.

pub mod api;
pub mod config;
pub mod domain;
pub mod itinerary;
pub mod query;
pub mod typeahead;
pub mod web;
