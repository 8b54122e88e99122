//! Per-tab counts for the status filter bar.

use evently_core::{Event, EventStatus, StatusFilter, Statistics};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub all: u64,
    pub upcoming: u64,
    pub ongoing: u64,
    pub completed: u64,
    pub cancelled: u64,
}

impl StatusCounts {
    /// Counts as reported by the server. `all` is the server total when
    /// it is present and nonzero, otherwise the sum of the categories.
    pub fn from_statistics(stats: &Statistics) -> Self {
        StatusCounts {
            all: stats.all(),
            upcoming: stats.count(EventStatus::Upcoming),
            ongoing: stats.count(EventStatus::Ongoing),
            completed: stats.count(EventStatus::Completed),
            cancelled: stats.count(EventStatus::Cancelled),
        }
    }

    /// Counts over a local event list. Only approximate when that list is
    /// itself filtered.
    pub fn from_events(events: &[Event]) -> Self {
        let count = |status: EventStatus| events.iter().filter(|e| e.status == status).count() as u64;

        StatusCounts {
            all: events.len() as u64,
            upcoming: count(EventStatus::Upcoming),
            ongoing: count(EventStatus::Ongoing),
            completed: count(EventStatus::Completed),
            cancelled: count(EventStatus::Cancelled),
        }
    }

    pub fn get(&self, filter: StatusFilter) -> u64 {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(status) => self.for_status(status),
        }
    }

    pub fn for_status(&self, status: EventStatus) -> u64 {
        match status {
            EventStatus::Upcoming => self.upcoming,
            EventStatus::Ongoing => self.ongoing,
            EventStatus::Completed => self.completed,
            EventStatus::Cancelled => self.cancelled,
        }
    }
}
