//! The operations the store needs from the event API.
//!
//! `EventApiClient` is the HTTP implementation; tests plug in stubs.

use async_trait::async_trait;
use evently_core::{ApiEnvelope, Event, EventQuery, EventResult, Statistics};

/// One method per HTTP operation of the event endpoint.
///
/// Each call yields the server's envelope, including server-signaled
/// failures, or `EventError::Transport` when no envelope could be
/// obtained. Implementations never retry.
#[async_trait]
pub trait EventApi: Send + Sync {
    async fn list_events(&self, query: &EventQuery) -> EventResult<ApiEnvelope<Vec<Event>>>;

    async fn get_event(&self, id: &str) -> EventResult<ApiEnvelope<Event>>;

    /// The event is sent without an id, whatever the caller passed.
    async fn create_event(&self, event: &Event) -> EventResult<ApiEnvelope<Event>>;

    /// `id` is sent as a query parameter and also written into the body.
    async fn update_event(&self, id: &str, event: &Event) -> EventResult<ApiEnvelope<Event>>;

    async fn delete_event(&self, id: &str) -> EventResult<ApiEnvelope<()>>;

    async fn get_statistics(&self) -> EventResult<ApiEnvelope<Statistics>>;
}
