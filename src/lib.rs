//! Client-side data layer for the event management API.
//!
//! This crate provides:
//! - `EventApiClient`, the HTTP client for the single event endpoint
//! - `EventStore`, the observable list/detail/statistics state the UI renders
//! - `ClientConfig` for the server location and request timeout
//!
//! The wire types live in `evently-core` and are re-exported here.

pub mod api;
pub mod client;
pub mod config;
pub mod logging;
pub mod store;

pub use api::EventApi;
pub use client::EventApiClient;
pub use config::ClientConfig;
pub use store::{EventStore, StatusCounts, StoreResult, StoreState};

pub use evently_core::*;
