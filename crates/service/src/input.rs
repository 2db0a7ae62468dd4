//! Lenient request-field decoding shared by the resource services.
//!
//! Clients post form values, so numbers may arrive as strings and dates as
//! bare `YYYY-MM-DD`. These helpers accept those shapes and reject the rest.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ServiceError;

fn value_to_f64<E: de::Error>(v: Value) -> Result<Option<f64>, E> {
    match v {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| E::custom("number out of range")),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(E::custom(format!("expected a number, got \"{s}\""))),
        },
        other => Err(E::custom(format!("expected a number, got {other}"))),
    }
}

/// Number or numeric string; `null` and `""` count as absent.
pub fn lenient_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_f64(Value::deserialize(d)?)
}

/// Tells "absent" (outer `None`, via `#[serde(default)]`) apart from an
/// explicit `null` (`Some(None)`).
pub fn nullable_f64<'de, D>(d: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    value_to_f64(Value::deserialize(d)?).map(Some)
}

/// RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (UTC) or `YYYY-MM-DD` (UTC midnight).
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Date string or epoch milliseconds; `null` and `""` count as absent.
pub fn lenient_datetime<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_datetime(&s).map(Some).ok_or_else(|| de::Error::custom(format!("invalid date \"{s}\""))),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .map(Some)
            .ok_or_else(|| de::Error::custom("invalid timestamp")),
        other => Err(de::Error::custom(format!("invalid date {other}"))),
    }
}

/// Any deserializable value where `null` and `""` count as absent, e.g. an
/// enum posted from an untouched select box.
pub fn blank_as_none<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        other => T::deserialize(other).map(Some).map_err(de::Error::custom),
    }
}

/// Non-blank text, or `None`. Mirrors "first truthy value wins" merging.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

pub fn required_text(value: Option<String>, message: &str) -> Result<String, ServiceError> {
    non_blank(value).ok_or_else(|| ServiceError::validation(message))
}

pub fn required<T>(value: Option<T>, message: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::validation(message))
}

/// Path ids that do not parse can never match a record.
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, ServiceError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ServiceError::not_found(entity))
}
