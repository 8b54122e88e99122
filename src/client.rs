//! HTTP client for the event API endpoint.
//!
//! Every operation goes to the same URL (`<base_url>/<endpoint>`) and is
//! told apart by method and query parameters:
//!
//! | operation      | request                                  |
//! |----------------|------------------------------------------|
//! | list           | `GET ?status=&date=` / `&date_from=&date_to=` |
//! | get            | `GET ?id=ID`                             |
//! | create         | `POST` with event body                   |
//! | update         | `PUT ?id=ID` with event body             |
//! | delete         | `DELETE ?id=ID`                          |
//! | statistics     | `GET ?stats=1`                           |

use async_trait::async_trait;
use evently_core::envelope::{STATUS_CREATED, STATUS_OK};
use evently_core::{ApiEnvelope, Event, EventError, EventQuery, EventResult, Statistics};
use reqwest::{Method, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::EventApi;
use crate::config::ClientConfig;

const ID_PARAM: &str = "id";
const STATS_PARAM: &str = "stats";
const STATUS_KEY: &str = "status";

/// HTTP client for the event API.
///
/// Cheap to clone; clones share the connection pool. Build one per
/// session and hand it to each `EventStore`.
#[derive(Clone, Debug)]
pub struct EventApiClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl EventApiClient {
    pub fn new(config: &ClientConfig) -> EventResult<Self> {
        let endpoint = config.endpoint_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| EventError::Config(format!("Could not build HTTP client: {e}")))?;

        Ok(Self { http, endpoint })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        query: &[(&str, String)],
        body: Option<&Event>,
    ) -> EventResult<ApiEnvelope<T>> {
        debug!(%method, url = %self.endpoint, ?query, "event API request");

        let mut request = self
            .http
            .request(method, self.endpoint.clone())
            .query(query);
        if let Some(event) = body {
            request = request.json(event);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        normalize_response(status, &bytes)
    }
}

#[async_trait]
impl EventApi for EventApiClient {
    async fn list_events(&self, query: &EventQuery) -> EventResult<ApiEnvelope<Vec<Event>>> {
        self.send(Method::GET, &query.query_pairs(), None).await
    }

    async fn get_event(&self, id: &str) -> EventResult<ApiEnvelope<Event>> {
        self.send(Method::GET, &[(ID_PARAM, id.to_string())], None)
            .await
    }

    async fn create_event(&self, event: &Event) -> EventResult<ApiEnvelope<Event>> {
        let body = Event {
            id: None,
            ..event.clone()
        };
        self.send(Method::POST, &[], Some(&body)).await
    }

    async fn update_event(&self, id: &str, event: &Event) -> EventResult<ApiEnvelope<Event>> {
        let body = Event {
            id: Some(id.to_string()),
            ..event.clone()
        };
        self.send(Method::PUT, &[(ID_PARAM, id.to_string())], Some(&body))
            .await
    }

    async fn delete_event(&self, id: &str) -> EventResult<ApiEnvelope<()>> {
        // whatever the server echoes back for a delete is not needed
        let envelope: ApiEnvelope<IgnoredAny> = self
            .send(Method::DELETE, &[(ID_PARAM, id.to_string())], None)
            .await?;
        Ok(envelope.map(|_| ()))
    }

    async fn get_statistics(&self) -> EventResult<ApiEnvelope<Statistics>> {
        self.send(Method::GET, &[(STATS_PARAM, "1".to_string())], None)
            .await
    }
}

/// Fold whatever the server sent into one envelope.
///
/// 1. A JSON object with a numeric `status` is an envelope, whatever the
///    HTTP status. Its `data` is only decoded when that status is a
///    success.
/// 2. On a 2xx status, an empty body or a bare payload is wrapped in a
///    success envelope.
/// 3. Anything else is a transport error.
fn normalize_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> EventResult<ApiEnvelope<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return if status.is_success() {
            Ok(ApiEnvelope::success(success_code(status), None))
        } else {
            Err(unreadable(status))
        };
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Err(unreadable(status)),
        Err(e) => return Err(malformed(e)),
    };

    if is_envelope(&value) {
        return serde_json::from_value::<ApiEnvelope<Value>>(value)
            .and_then(|envelope| envelope.decode())
            .map_err(malformed);
    }

    if !status.is_success() {
        return Err(unreadable(status));
    }

    let data = serde_json::from_value(value).map_err(malformed)?;
    warn!(%status, "response was not wrapped in an envelope, using bare payload");
    Ok(ApiEnvelope::success(success_code(status), Some(data)))
}

/// An event's own `status` ("upcoming", ...) never parses as a code.
fn is_envelope(value: &Value) -> bool {
    match value.get(STATUS_KEY) {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => s.trim().parse::<u16>().is_ok(),
        _ => false,
    }
}

// any 2xx reads as success; 201 is kept as is
fn success_code(status: StatusCode) -> u16 {
    if status == StatusCode::CREATED {
        STATUS_CREATED
    } else {
        STATUS_OK
    }
}

fn unreadable(status: StatusCode) -> EventError {
    EventError::Transport(format!(
        "server responded with HTTP {status} and no readable envelope"
    ))
}

fn malformed(e: serde_json::Error) -> EventError {
    EventError::Transport(format!("malformed response: {e}"))
}

fn transport_error(e: reqwest::Error) -> EventError {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("could not connect to server ({e})")
    } else {
        e.to_string()
    };
    EventError::Transport(reason)
}
