//! Conversions between Value and the on-disk JSON document.
//!
//! JSON has no bytes, dates, or non-finite numbers, so those are written as
//! single-key objects and recognized again on load:
//!
//! - `Bytes` -> `{"$bytes": "<base64>"}`
//! - `Date` -> `{"$date": "<RFC 3339>"}`
//! - `Float` NaN/±inf -> `{"$float": "NaN" | "inf" | "-inf"}`
//!
//! Map keys starting with `$` are written with one more `$` in front, so a
//! user map never reads back as a tag.

use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use prefcell_core_store::Value;

const TAG_PREFIX: char = '$';
const BYTES_TAG: &str = "$bytes";
const DATE_TAG: &str = "$date";
const FLOAT_TAG: &str = "$float";

/// Convert our Value to serde_json::Value.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => match serde_json::Number::from_f64(*f) {
            Some(n) => serde_json::Value::Number(n),
            None => tagged(FLOAT_TAG, non_finite_name(*f).to_string()),
        },
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(b) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(b);
            tagged(BYTES_TAG, encoded)
        }
        Value::Date(d) => tagged(DATE_TAG, d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (escape_key(k), value_to_json(v)))
                .collect(),
        ),
    }
}

/// Convert serde_json::Value to our Value.
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // Fallback for very large numbers
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => {
            if let Some(value) = untag(&map) {
                return value;
            }
            Value::Map(
                map.into_iter()
                    .map(|(k, v)| (unescape_key(k), json_to_value(v)))
                    .collect(),
            )
        }
    }
}

fn non_finite_name(f: f64) -> &'static str {
    if f.is_nan() {
        "NaN"
    } else if f > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

fn escape_key(key: &str) -> String {
    if key.starts_with(TAG_PREFIX) {
        format!("{TAG_PREFIX}{key}")
    } else {
        key.to_string()
    }
}

fn unescape_key(key: String) -> String {
    match key.strip_prefix(TAG_PREFIX) {
        Some(rest) if rest.starts_with(TAG_PREFIX) => rest.to_string(),
        _ => key,
    }
}

fn tagged(tag: &str, payload: String) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(tag.to_string(), serde_json::Value::String(payload));
    serde_json::Value::Object(map)
}

fn untag(map: &serde_json::Map<String, serde_json::Value>) -> Option<Value> {
    if map.len() != 1 {
        return None;
    }
    let (tag, payload) = map.iter().next()?;
    let payload = payload.as_str()?;

    match tag.as_str() {
        BYTES_TAG => base64::engine::general_purpose::STANDARD
            .decode(payload)
            .ok()
            .map(Value::Bytes),
        DATE_TAG => DateTime::parse_from_rfc3339(payload)
            .ok()
            .map(|d| Value::Date(d.with_timezone(&Utc))),
        FLOAT_TAG => match payload {
            "NaN" => Some(Value::Float(f64::NAN)),
            "inf" => Some(Value::Float(f64::INFINITY)),
            "-inf" => Some(Value::Float(f64::NEG_INFINITY)),
            _ => None,
        },
        _ => None,
    }
}
