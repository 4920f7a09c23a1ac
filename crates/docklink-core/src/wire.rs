//! Tagged wire value crossing the host boundary.
//!
//! Every wire value materializes to JSON as a `{"type": tag, "value":
//! payload}` map so the host can dispatch without knowing the document
//! schema. The tag set is closed; anything else arriving from the host is
//! an [`WireError::UnknownWireType`].

use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::value::GeoPoint;

/// Wire timestamp layout: UTC, second precision, literal `Z` suffix.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Formats a timestamp in the wire layout, truncating sub-second precision.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

/// Parses a wire timestamp. The layout is exact: offsets other than the
/// literal `Z` and fractional seconds are rejected.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw, DATE_FORMAT).map(|naive| naive.and_utc())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("unknown wire type: {0}")]
    UnknownWireType(String),
    #[error("malformed {0} payload")]
    MalformedPayload(&'static str),
    #[error("wire value must be a tagged object")]
    NotATypeMap,
}

/// A tagged, self-describing boundary value.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<WireValue>),
    Object(IndexMap<String, WireValue>),
    /// Fully-qualified document path.
    Reference(String),
    GeoPoint(GeoPoint),
    /// Raw `date` payload. Kept as the wire string so host-supplied values
    /// round-trip unchanged; parsing happens at decode time.
    Date(String),
}

impl WireValue {
    pub fn tag(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Boolean(_) => "boolean",
            WireValue::Number(_) => "number",
            WireValue::String(_) => "string",
            WireValue::Array(_) => "array",
            WireValue::Object(_) => "object",
            WireValue::Reference(_) => "reference",
            WireValue::GeoPoint(_) => "geopoint",
            WireValue::Date(_) => "date",
        }
    }

    /// Materializes the tagged JSON form handed to the host.
    pub fn to_json(&self) -> Value {
        let payload = match self {
            WireValue::Null => Value::Null,
            WireValue::Boolean(b) => Value::Bool(*b),
            WireValue::Number(n) => Value::from(*n),
            WireValue::String(s) => Value::String(s.clone()),
            WireValue::Array(items) => {
                Value::Array(items.iter().map(WireValue::to_json).collect())
            }
            WireValue::Object(fields) => {
                let mut map = Map::new();
                for (k, v) in fields {
                    map.insert(k.clone(), v.to_json());
                }
                Value::Object(map)
            }
            WireValue::Reference(path) => Value::String(path.clone()),
            WireValue::GeoPoint(gp) => {
                let mut map = Map::new();
                map.insert("latitude".to_string(), Value::from(gp.latitude));
                map.insert("longitude".to_string(), Value::from(gp.longitude));
                Value::Object(map)
            }
            WireValue::Date(raw) => Value::String(raw.clone()),
        };

        let mut map = Map::new();
        map.insert("type".to_string(), Value::String(self.tag().to_string()));
        map.insert("value".to_string(), payload);
        Value::Object(map)
    }

    /// Parses the tagged JSON form supplied by the host.
    pub fn from_json(v: &Value) -> Result<WireValue, WireError> {
        let map = v.as_object().ok_or(WireError::NotATypeMap)?;
        let tag = map
            .get("type")
            .and_then(Value::as_str)
            .ok_or(WireError::NotATypeMap)?;
        let payload = map.get("value").unwrap_or(&Value::Null);

        match tag {
            "null" => Ok(WireValue::Null),
            "boolean" => payload
                .as_bool()
                .map(WireValue::Boolean)
                .ok_or(WireError::MalformedPayload("boolean")),
            "number" => payload
                .as_f64()
                .map(WireValue::Number)
                .ok_or(WireError::MalformedPayload("number")),
            "string" => payload
                .as_str()
                .map(|s| WireValue::String(s.to_string()))
                .ok_or(WireError::MalformedPayload("string")),
            "array" => payload
                .as_array()
                .ok_or(WireError::MalformedPayload("array"))?
                .iter()
                .map(WireValue::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(WireValue::Array),
            "object" => {
                let fields = payload
                    .as_object()
                    .ok_or(WireError::MalformedPayload("object"))?;
                let mut out = IndexMap::with_capacity(fields.len());
                for (k, child) in fields {
                    out.insert(k.clone(), WireValue::from_json(child)?);
                }
                Ok(WireValue::Object(out))
            }
            "reference" => payload
                .as_str()
                .map(|s| WireValue::Reference(s.to_string()))
                .ok_or(WireError::MalformedPayload("reference")),
            "geopoint" => {
                let gp = payload
                    .as_object()
                    .ok_or(WireError::MalformedPayload("geopoint"))?;
                let latitude = gp
                    .get("latitude")
                    .and_then(Value::as_f64)
                    .ok_or(WireError::MalformedPayload("geopoint"))?;
                let longitude = gp
                    .get("longitude")
                    .and_then(Value::as_f64)
                    .ok_or(WireError::MalformedPayload("geopoint"))?;
                Ok(WireValue::GeoPoint(GeoPoint::new(latitude, longitude)))
            }
            "date" => payload
                .as_str()
                .map(|s| WireValue::Date(s.to_string()))
                .ok_or(WireError::MalformedPayload("date")),
            other => Err(WireError::UnknownWireType(other.to_string())),
        }
    }

    /// Untyped plain-JSON projection for host-side debugging. Lossy: tags
    /// are dropped, references flatten to their path strings.
    pub fn to_plain_json(&self) -> Value {
        match self {
            WireValue::Null => Value::Null,
            WireValue::Boolean(b) => Value::Bool(*b),
            WireValue::Number(n) => Value::from(*n),
            WireValue::String(s) | WireValue::Reference(s) | WireValue::Date(s) => {
                Value::String(s.clone())
            }
            WireValue::Array(items) => {
                Value::Array(items.iter().map(WireValue::to_plain_json).collect())
            }
            WireValue::Object(fields) => {
                let mut map = Map::new();
                for (k, v) in fields {
                    map.insert(k.clone(), v.to_plain_json());
                }
                Value::Object(map)
            }
            WireValue::GeoPoint(gp) => {
                let mut map = Map::new();
                map.insert("latitude".to_string(), Value::from(gp.latitude));
                map.insert("longitude".to_string(), Value::from(gp.longitude));
                Value::Object(map)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_roundtrip_for_every_tag() {
        let samples = vec![
            WireValue::Null,
            WireValue::Boolean(true),
            WireValue::Number(-7.25),
            WireValue::String("hello".to_string()),
            WireValue::Array(vec![WireValue::Number(1.0), WireValue::Null]),
            WireValue::Object(IndexMap::from([(
                "k".to_string(),
                WireValue::Boolean(false),
            )])),
            WireValue::Reference("users/ada".to_string()),
            WireValue::GeoPoint(GeoPoint::new(51.5, -0.12)),
            WireValue::Date("2020-01-01T00:00:00Z".to_string()),
        ];
        for sample in samples {
            let round = WireValue::from_json(&sample.to_json()).expect("tagged form should parse");
            assert_eq!(round, sample);
        }
    }

    #[test]
    fn null_tag_carries_null_payload() {
        assert_eq!(
            WireValue::Null.to_json(),
            json!({"type": "null", "value": null})
        );
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = WireValue::from_json(&json!({"type": "bogus", "value": 1}))
            .expect_err("bogus tag should fail");
        assert_eq!(err, WireError::UnknownWireType("bogus".to_string()));
    }

    #[test]
    fn geopoint_payload_requires_both_fields() {
        let err = WireValue::from_json(&json!({"type": "geopoint", "value": {"latitude": 1.0}}))
            .expect_err("half a geopoint should fail");
        assert_eq!(err, WireError::MalformedPayload("geopoint"));
    }

    #[test]
    fn timestamp_format_is_second_precision_utc() {
        let ts = parse_timestamp("2020-01-01T00:00:00Z").expect("timestamp should parse");
        assert_eq!(format_timestamp(&ts), "2020-01-01T00:00:00Z");
    }

    #[test]
    fn timestamp_parse_rejects_offsets_and_fractions() {
        assert!(parse_timestamp("2020-01-01T00:00:00+02:00").is_err());
        assert!(parse_timestamp("2020-01-01T00:00:00.250Z").is_err());
        assert!(parse_timestamp("not a date").is_err());
    }

    #[test]
    fn plain_view_flattens_rich_types() {
        let wire = WireValue::Object(IndexMap::from([
            (
                "ref".to_string(),
                WireValue::Reference("rooms/1".to_string()),
            ),
            (
                "where".to_string(),
                WireValue::GeoPoint(GeoPoint::new(2.0, 3.0)),
            ),
        ]));
        assert_eq!(
            wire.to_plain_json(),
            json!({"ref": "rooms/1", "where": {"latitude": 2.0, "longitude": 3.0}})
        );
    }
}
