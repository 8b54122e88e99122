//! Aggregate event counts as reported by `GET <endpoint>?stats=1`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::coerce::count_from_value;
use crate::event::EventStatus;

const TOTAL_KEY: &str = "total";

/// Per-status counts plus the server's own total, if it sent one.
///
/// Built once from the raw JSON object at decoding time; values may be
/// numbers or numeric strings, anything else counts as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    counts: BTreeMap<EventStatus, u64>,
    total: Option<u64>,
}

impl Statistics {
    pub fn new(counts: impl IntoIterator<Item = (EventStatus, u64)>, total: Option<u64>) -> Self {
        Statistics {
            counts: counts.into_iter().collect(),
            total,
        }
    }

    /// Read the known keys out of a raw statistics object.
    /// Unknown keys are ignored.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let counts = EventStatus::ALL
            .into_iter()
            .filter_map(|status| {
                raw.get(status.as_str())
                    .map(|value| (status, count_from_value(value)))
            })
            .collect();

        Statistics {
            counts,
            total: raw.get(TOTAL_KEY).map(count_from_value),
        }
    }

    pub fn count(&self, status: EventStatus) -> u64 {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    /// The total as sent by the server, which may be missing or 0.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn category_sum(&self) -> u64 {
        EventStatus::ALL.iter().map(|s| self.count(*s)).sum()
    }

    /// Server total when present and nonzero, otherwise the category sum.
    pub fn all(&self) -> u64 {
        match self.total {
            Some(total) if total > 0 => total,
            _ => self.category_sum(),
        }
    }
}

impl<'de> Deserialize<'de> for Statistics {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Statistics::from_raw(&raw))
    }
}
