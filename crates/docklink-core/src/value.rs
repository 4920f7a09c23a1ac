//! Native-side value model for the document database boundary.
//!
//! `FieldValue` is the closed set of value kinds the database client can
//! hand to (or accept from) the bridge. Everything the wire format models
//! has a constructor here; `Bytes` is the one native kind the wire format
//! does not carry, so encoding it is a codec fault rather than a panic.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// Latitude/longitude coordinate pair, as stored by the document database.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Live handle to a document, bound to the client instance that minted it.
///
/// The handle carries the slash-separated document path only; it never owns
/// or closes the underlying client connection. Client adapters mint handles
/// through [`ReferenceResolver::document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    path: String,
}

impl DocumentRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Fully-qualified document path, e.g. `users/ada/posts/1`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Capability for turning a path string back into a live handle.
///
/// Implemented by the database client adapter; the codec holds a borrow for
/// the duration of one decode and only consults it for `reference` tags.
pub trait ReferenceResolver {
    fn document(&self, path: &str) -> DocumentRef;
}

/// A document field value.
///
/// Integral numerics widen to `f64` at construction (see the `From` impls),
/// which is lossy above 2^53. That boundary is inherited from the wire
/// format's single `number` representation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Array(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
    Reference(DocumentRef),
    GeoPoint(GeoPoint),
    Timestamp(DateTime<Utc>),
    /// Binary blob. Representable natively, not modelled by the wire format.
    Bytes(Vec<u8>),
}

impl FieldValue {
    /// Lowercase kind name, used in fault messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::Array(_) => "array",
            FieldValue::Map(_) => "map",
            FieldValue::Reference(_) => "reference",
            FieldValue::GeoPoint(_) => "geopoint",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Bytes(_) => "bytes",
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Boolean(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        // Lossy above 2^53.
        FieldValue::Number(v as f64)
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<GeoPoint> for FieldValue {
    fn from(v: GeoPoint) -> Self {
        FieldValue::GeoPoint(v)
    }
}

impl From<DocumentRef> for FieldValue {
    fn from(v: DocumentRef) -> Self {
        FieldValue::Reference(v)
    }
}
