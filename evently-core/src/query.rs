//! Query parameters for listing events.

use crate::event::EventStatus;
use crate::filter::StatusFilter;

pub const STATUS_PARAM: &str = "status";
pub const DATE_PARAM: &str = "date";
pub const DATE_FROM_PARAM: &str = "date_from";
pub const DATE_TO_PARAM: &str = "date_to";

/// Filters for `GET <endpoint>`.
/// None values are left out of the request.
///
/// A single `date` takes precedence over a range; a range is only sent
/// when both bounds are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub status: Option<EventStatus>,
    /// YYYY-MM-DD
    pub date: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl EventQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_filter(filter: StatusFilter) -> Self {
        EventQuery {
            status: filter.status(),
            ..Self::default()
        }
    }

    pub fn on_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn between(mut self, from: &str, to: &str) -> Self {
        self.date_from = Some(from.to_string());
        self.date_to = Some(to.to_string());
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(status) = self.status {
            pairs.push((STATUS_PARAM, status.as_str().to_string()));
        }

        if let Some(date) = &self.date {
            pairs.push((DATE_PARAM, date.clone()));
        } else if let (Some(from), Some(to)) = (&self.date_from, &self.date_to) {
            pairs.push((DATE_FROM_PARAM, from.clone()));
            pairs.push((DATE_TO_PARAM, to.clone()));
        }

        pairs
    }
}
