//! Observable state container between the UI and the event API.
//!
//! Every operation has the same shape: mark loading, call the API, then
//! either apply the result or record the error, and finally drop the
//! loading mark. Data already held stays visible while a request is in
//! flight and is only replaced on success.
//!
//! Mutations (create, update, delete) never patch the local list. On
//! success they are followed by a list fetch under the active filter and
//! a statistics fetch.

mod counts;
mod state;


pub use counts::StatusCounts;
pub use state::StoreState;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use evently_core::{Event, EventError, EventQuery, StatusFilter, Statistics};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::api::EventApi;

/// Outcome of a store operation. The error is also recorded in
/// `StoreState::last_error`.
pub type StoreResult<T> = Result<T, EventError>;

/// Holds list, detail, filter and statistics state for one screen group.
///
/// Operations take `&self`, so they can overlap. Each fetch family (list,
/// detail, statistics) is sequenced: a response is dropped if a newer
/// request of the same family has already been applied.
pub struct EventStore<A> {
    api: A,
    state: watch::Sender<StoreState>,
    in_flight: AtomicUsize,
    list_requests: RequestSequence,
    detail_requests: RequestSequence,
    statistics_requests: RequestSequence,
}

impl<A: EventApi> EventStore<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(StoreState::default());

        EventStore {
            api,
            state,
            in_flight: AtomicUsize::new(0),
            list_requests: RequestSequence::default(),
            detail_requests: RequestSequence::default(),
            statistics_requests: RequestSequence::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // STATE:

    pub fn state(&self) -> StoreState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    pub fn selected_event(&self) -> Option<Event> {
        self.state.borrow().selected_event.clone()
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.state.borrow().statistics.clone()
    }

    pub fn current_filter(&self) -> StatusFilter {
        self.state.borrow().current_filter
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.borrow().last_error.clone()
    }

    /// Counts per filter tab. Uses the server statistics when present,
    /// otherwise counts the events currently held.
    pub fn status_counts(&self) -> StatusCounts {
        let state = self.state.borrow();
        match &state.statistics {
            Some(stats) => StatusCounts::from_statistics(stats),
            None => StatusCounts::from_events(&state.events),
        }
    }

    // READ OPERATIONS:

    /// Switch the status tab and fetch the matching events.
    pub async fn set_filter(&self, filter: StatusFilter) -> StoreResult<Vec<Event>> {
        self.state.send_modify(|s| s.current_filter = filter);
        self.fetch_all().await
    }

    /// Fetch the events for the active filter.
    pub async fn fetch_all(&self) -> StoreResult<Vec<Event>> {
        let query = EventQuery::for_filter(self.current_filter());
        self.fetch_matching(query).await
    }

    /// Fetch with explicit query parameters (status, date, date range).
    /// On success the result replaces `events` wholesale.
    pub async fn fetch_matching(&self, query: EventQuery) -> StoreResult<Vec<Event>> {
        let ticket = self.list_requests.next();
        let _loading = self.start_loading();
        debug!(?query, ticket, "fetching events");

        let result = self
            .api
            .list_events(&query)
            .await
            .and_then(|envelope| envelope.into_result())
            .map(Option::unwrap_or_default);

        if !self.list_requests.claim(ticket) {
            debug!(ticket, "discarding stale event list response");
            return result;
        }

        match result {
            Ok(events) => {
                debug!(count = events.len(), "events loaded");
                self.succeed(|s| s.events = events.clone());
                Ok(events)
            }
            Err(e) => self.fail("fetch events", e),
        }
    }

    /// Load one event into `selected_event`.
    ///
    /// No request is made when the selected event already has this id;
    /// that still counts as a success and clears `last_error`.
    pub async fn fetch_by_id(&self, id: &str) -> StoreResult<Event> {
        let cached = self
            .state
            .borrow()
            .selected_event
            .clone()
            .filter(|e| e.has_id(id));
        if let Some(event) = cached {
            debug!(id, "selected event already loaded");
            self.state.send_if_modified(|s| s.last_error.take().is_some());
            return Ok(event);
        }

        let ticket = self.detail_requests.next();
        let _loading = self.start_loading();
        debug!(id, ticket, "fetching event");

        let result = self
            .api
            .get_event(id)
            .await
            .and_then(|envelope| envelope.into_data(&format!("event {id}")));

        if !self.detail_requests.claim(ticket) {
            debug!(ticket, "discarding stale event response");
            return result;
        }

        match result {
            Ok(event) => {
                self.succeed(|s| s.selected_event = Some(event.clone()));
                Ok(event)
            }
            Err(e) => self.fail("fetch event", e),
        }
    }

    /// Fetch aggregate counts. A failure clears `statistics`.
    pub async fn fetch_statistics(&self) -> StoreResult<Statistics> {
        let ticket = self.statistics_requests.next();
        let _loading = self.start_loading();
        debug!(ticket, "fetching statistics");

        let result = self
            .api
            .get_statistics()
            .await
            .and_then(|envelope| envelope.into_data("statistics"));

        if !self.statistics_requests.claim(ticket) {
            debug!(ticket, "discarding stale statistics response");
            return result;
        }

        match result {
            Ok(stats) => {
                self.succeed(|s| s.statistics = Some(stats.clone()));
                Ok(stats)
            }
            Err(e) => {
                self.state.send_modify(|s| s.statistics = None);
                self.fail("fetch statistics", e)
            }
        }
    }

    /// Re-fetch the list (active filter) and statistics together.
    pub async fn refresh(&self) -> StoreResult<()> {
        let (events, statistics) = tokio::join!(self.fetch_all(), self.fetch_statistics());
        events.and(statistics).map(|_| ())
    }

    // WRITE OPERATIONS:

    /// Create an event. The id of `event` is ignored; the server assigns
    /// one. Returns the server's copy, or `event` itself if the server
    /// sent none back.
    pub async fn create(&self, event: &Event) -> StoreResult<Event> {
        let _loading = self.start_loading();
        debug!(title = %event.title, "creating event");

        let created = match self
            .api
            .create_event(event)
            .await
            .and_then(|envelope| envelope.into_result())
        {
            Ok(data) => data.unwrap_or_else(|| event.clone()),
            Err(e) => return self.fail("create event", e),
        };

        self.after_mutation().await;
        Ok(created)
    }

    /// Replace the event `id` with `event`.
    pub async fn update(&self, id: &str, event: &Event) -> StoreResult<Event> {
        let _loading = self.start_loading();
        debug!(id, "updating event");

        let updated = match self
            .api
            .update_event(id, event)
            .await
            .and_then(|envelope| envelope.into_result())
        {
            Ok(data) => data.unwrap_or_else(|| Event {
                id: Some(id.to_string()),
                ..event.clone()
            }),
            Err(e) => return self.fail("update event", e),
        };

        // the selection must not serve the pre-update copy
        self.detail_requests.invalidate();
        self.state.send_if_modified(|s| {
            let selected = s.selected_event.as_ref().is_some_and(|e| e.has_id(id));
            if selected {
                s.selected_event = Some(updated.clone());
            }
            selected
        });

        self.after_mutation().await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let _loading = self.start_loading();
        debug!(id, "deleting event");

        if let Err(e) = self
            .api
            .delete_event(id)
            .await
            .and_then(|envelope| envelope.into_result())
        {
            return self.fail("delete event", e);
        }

        self.detail_requests.invalidate();
        self.state.send_if_modified(|s| {
            let selected = s.selected_event.as_ref().is_some_and(|e| e.has_id(id));
            if selected {
                s.selected_event = None;
            }
            selected
        });

        self.after_mutation().await;
        Ok(())
    }

    // LIFECYCLE:

    /// Leave the detail flow: drop the selection and any error it left.
    pub fn clear_selection(&self) {
        self.detail_requests.invalidate();
        self.state.send_modify(|s| {
            s.selected_event = None;
            s.last_error = None;
        });
    }

    /// Back to defaults when the owning flow ends. Responses still in
    /// flight are discarded when they arrive.
    pub fn reset(&self) {
        self.list_requests.invalidate();
        self.detail_requests.invalidate();
        self.statistics_requests.invalidate();

        self.state.send_modify(|s| {
            *s = StoreState {
                is_loading: self.in_flight.load(Ordering::SeqCst) > 0,
                ..StoreState::default()
            }
        });
    }

    // INTERNAL:

    async fn after_mutation(&self) {
        self.succeed(|_| {});
        // refetch failures land in last_error through the fetches themselves
        let _ = tokio::join!(self.fetch_all(), self.fetch_statistics());
    }

    fn succeed(&self, apply: impl FnOnce(&mut StoreState)) {
        self.state.send_modify(|s| {
            apply(s);
            s.last_error = None;
        });
    }

    fn fail<T>(&self, operation: &str, error: EventError) -> StoreResult<T> {
        warn!(operation, %error, "event store operation failed");
        let message = error.to_string();
        self.state.send_modify(|s| s.last_error = Some(message));
        Err(error)
    }

    fn start_loading(&self) -> Loading<'_> {
        Loading::start(&self.state, &self.in_flight)
    }
}

/// Marks one operation as in flight for as long as it is alive.
///
/// Dropping it (normal return, early return, or the operation future
/// being dropped) clears `is_loading` once nothing else is in flight.
struct Loading<'a> {
    state: &'a watch::Sender<StoreState>,
    in_flight: &'a AtomicUsize,
}

impl<'a> Loading<'a> {
    fn start(state: &'a watch::Sender<StoreState>, in_flight: &'a AtomicUsize) -> Self {
        state.send_if_modified(|s| {
            in_flight.fetch_add(1, Ordering::SeqCst);
            set_loading(s, true)
        });
        Loading { state, in_flight }
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|s| {
            let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            set_loading(s, remaining > 0)
        });
    }
}

fn set_loading(state: &mut StoreState, loading: bool) -> bool {
    let changed = state.is_loading != loading;
    state.is_loading = loading;
    changed
}

/// Monotonic tickets for one family of requests.
#[derive(Default)]
struct RequestSequence {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl RequestSequence {
    fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True if `ticket` may be applied, i.e. nothing newer was applied yet.
    fn claim(&self, ticket: u64) -> bool {
        self.applied.fetch_max(ticket, Ordering::SeqCst) < ticket
    }

    /// Make every ticket issued so far unclaimable.
    fn invalidate(&self) {
        self.applied
            .fetch_max(self.issued.load(Ordering::SeqCst), Ordering::SeqCst);
    }
}
