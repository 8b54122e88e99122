//! Core types for the evently data layer.
//!
//! This crate provides the wire-level types shared by the API client and
//! the event store:
//! - `Event` and `EventStatus` for the event resource
//! - `ApiEnvelope` for the status/message/data wrapper every call returns
//! - `Statistics`, `EventQuery` and `StatusFilter` for listing and counting
//! - `EventError` for everything that can go wrong on the way

pub mod coerce;
pub mod envelope;
pub mod error;
pub mod event;
pub mod filter;
pub mod query;
pub mod statistics;

pub use envelope::ApiEnvelope;
pub use error::{EventError, EventResult};
pub use event::{Event, EventStatus, normalize_time};
pub use filter::StatusFilter;
pub use query::EventQuery;
pub use statistics::Statistics;
