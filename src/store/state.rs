//! The view state published by `EventStore`.

use evently_core::{Event, StatusFilter, Statistics};

/// Snapshot of everything the list, detail and statistics views render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    /// Last successful list result, in server order. Replaced wholesale,
    /// never merged.
    pub events: Vec<Event>,
    /// Owned by the detail flow; cleared when that flow ends.
    pub selected_event: Option<Event>,
    /// `None` if never fetched or the last fetch failed.
    pub statistics: Option<Statistics>,
    pub current_filter: StatusFilter,
    /// True while at least one operation is in flight.
    pub is_loading: bool,
    /// Kept until the next successful operation.
    pub last_error: Option<String>,
}
