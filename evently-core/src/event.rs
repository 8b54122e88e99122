//! The event resource as exchanged with the API.
//!
//! Dates and times stay in their wire form (`YYYY-MM-DD`, `HH:MM[:SS]`).
//! Preparing them for submission is the caller's job; `normalize_time`
//! and `Event::validate` are here to help with that, but neither the
//! client nor the store applies them on its own.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::coerce;
use crate::error::{EventError, EventResult};

/// An event as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Server-assigned identifier. `None` until the event has been created.
    #[serde(
        default,
        deserialize_with = "coerce::id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM:SS` on the wire, `HH:MM` tolerated on read
    pub time: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub location: String,
    #[serde(default, deserialize_with = "coerce::text")]
    pub description: String,
    #[serde(default, deserialize_with = "coerce::capacity")]
    pub capacity: u32,
    #[serde(default)]
    pub status: EventStatus,
}

/// Lowercase on the wire. Decoding goes through `FromStr`, so case and
/// surrounding whitespace are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub const ALL: [EventStatus; 4] = [
        EventStatus::Upcoming,
        EventStatus::Ongoing,
        EventStatus::Completed,
        EventStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EventError::Validation(format!("unknown event status '{s}'")))
    }
}

impl TryFrom<String> for EventStatus {
    type Error = EventError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Event {
    /// A not-yet-created event with empty optional fields.
    pub fn new(title: &str, date: &str, time: &str, status: EventStatus) -> Self {
        Event {
            id: None,
            title: title.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            location: String::new(),
            description: String::new(),
            capacity: 0,
            status,
        }
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Copy of this event with `time` expanded to `HH:MM:SS`.
    pub fn with_normalized_time(&self) -> Event {
        Event {
            time: normalize_time(&self.time),
            ..self.clone()
        }
    }

    /// Check the fields a submission needs to be well formed.
    pub fn validate(&self) -> EventResult<()> {
        if self.title.trim().is_empty() {
            return Err(EventError::Validation("title is required".into()));
        }

        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").map_err(|_| {
            EventError::Validation(format!(
                "invalid date '{}'. Expected YYYY-MM-DD",
                self.date
            ))
        })?;

        NaiveTime::parse_from_str(&self.time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&self.time, "%H:%M"))
            .map_err(|_| {
                EventError::Validation(format!(
                    "invalid time '{}'. Expected HH:MM or HH:MM:SS",
                    self.time
                ))
            })?;

        Ok(())
    }
}

/// Expand `HH:MM` to `HH:MM:SS`. Other input is returned trimmed but
/// otherwise untouched.
pub fn normalize_time(time: &str) -> String {
    let time = time.trim();
    if time.matches(':').count() == 1 {
        format!("{time}:00")
    } else {
        time.to_string()
    }
}
