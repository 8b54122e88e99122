//! The status/message/data wrapper returned by every call to the event API.
//!
//! Format: `{ "status": 200, "message": "...", "data": ... }`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coerce;
use crate::error::{EventError, EventResult};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(deserialize_with = "coerce::status_code")]
    pub status: u16,
    #[serde(default, deserialize_with = "coerce::text")]
    pub message: String,
    /// Only meaningful when `status` indicates success.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(status: u16, data: Option<T>) -> Self {
        ApiEnvelope {
            status,
            message: String::new(),
            data,
        }
    }

    pub fn failure(status: u16, message: &str) -> Self {
        ApiEnvelope {
            status,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, STATUS_OK | STATUS_CREATED)
    }

    /// Split into the payload (which may legitimately be absent, e.g. on
    /// delete) or the server-signaled failure.
    pub fn into_result(self) -> EventResult<Option<T>> {
        if self.is_success() {
            return Ok(self.data);
        }

        let message = if self.message.trim().is_empty() {
            format!("Request failed with status {}", self.status)
        } else {
            self.message
        };

        Err(EventError::Server {
            status: self.status,
            message,
        })
    }

    /// Like `into_result`, but a success without payload is an error too.
    /// `what` names the missing payload in the error message.
    pub fn into_data(self, what: &str) -> EventResult<T> {
        self.into_result()?
            .ok_or_else(|| EventError::MissingData(what.to_string()))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiEnvelope<U> {
        ApiEnvelope {
            status: self.status,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

impl ApiEnvelope<Value> {
    /// Decode the payload as `T`. A failure envelope keeps its status and
    /// message and drops `data` undecoded, whatever shape it has.
    pub fn decode<T: DeserializeOwned>(self) -> serde_json::Result<ApiEnvelope<T>> {
        if !self.is_success() {
            return Ok(ApiEnvelope {
                status: self.status,
                message: self.message,
                data: None,
            });
        }

        let data = match self.data {
            None | Some(Value::Null) => None,
            Some(raw) => Some(serde_json::from_value(raw)?),
        };

        Ok(ApiEnvelope {
            status: self.status,
            message: self.message,
            data,
        })
    }
}
