//! Lenient decoding for the loosely typed event API.
//!
//! Depending on the server revision, ids, counts and status codes arrive
//! either as JSON numbers or as numeric strings, and optional text fields
//! may be `null`. Everything is folded into plain Rust values here so
//! nothing past the decoding boundary has to care.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a non-negative count out of a JSON value.
///
/// Numbers and numeric strings are accepted. Anything else, including
/// negative numbers, reads as 0.
pub fn count_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(non_negative)),
        Value::String(s) => parse_count(s),
        _ => None,
    }
    .unwrap_or(0)
}

fn parse_count(s: &str) -> Option<u64> {
    let s = s.trim();
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(non_negative))
}

fn non_negative(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then_some(f as u64)
}

/// `capacity`: number or numeric string, clamped to a non-negative `u32`.
pub fn capacity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let count = value.as_ref().map(count_from_value).unwrap_or(0);
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// `id`: string or integer. Empty strings and `null` mean "no id yet".
pub fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number for id, got {other}"
        ))),
    }
}

/// Envelope `status`: integer or numeric string.
pub fn status_code<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let code = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    code.and_then(|c| u16::try_from(c).ok())
        .ok_or_else(|| D::Error::custom(format!("invalid status code {value}")))
}

/// Optional text: `null` or missing reads as an empty string.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
