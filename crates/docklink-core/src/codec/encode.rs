//! Native → wire direction: field values, document snapshots, query
//! snapshots.

use indexmap::IndexMap;

use super::{child_index, child_key, Codec, CodecError, CodecReport};
use crate::snapshot::{DocumentSnapshot, QuerySnapshot, SnapshotMetadata};
use crate::value::FieldValue;
use crate::wire::{format_timestamp, WireValue};

impl Codec {
    /// Encodes one native value into its tagged wire form.
    ///
    /// Array order and map key sets are preserved exactly. The only
    /// fallible kind is `Bytes` (no wire representation); everything else
    /// is covered by the closed tag set.
    pub fn encode(
        &self,
        value: &FieldValue,
        report: &mut CodecReport,
    ) -> Result<WireValue, CodecError> {
        self.encode_at("", value, report)
    }

    fn encode_at(
        &self,
        path: &str,
        value: &FieldValue,
        report: &mut CodecReport,
    ) -> Result<WireValue, CodecError> {
        match value {
            FieldValue::Null => Ok(WireValue::Null),
            FieldValue::Boolean(b) => Ok(WireValue::Boolean(*b)),
            FieldValue::Number(n) => Ok(WireValue::Number(*n)),
            FieldValue::String(s) => Ok(WireValue::String(s.clone())),
            FieldValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.encode_at(&child_index(path, i), item, report)?);
                }
                Ok(WireValue::Array(out))
            }
            FieldValue::Map(fields) => {
                let mut out = IndexMap::with_capacity(fields.len());
                for (k, v) in fields {
                    out.insert(k.clone(), self.encode_at(&child_key(path, k), v, report)?);
                }
                Ok(WireValue::Object(out))
            }
            FieldValue::Reference(handle) => Ok(WireValue::Reference(handle.path().to_string())),
            FieldValue::GeoPoint(gp) => Ok(WireValue::GeoPoint(*gp)),
            FieldValue::Timestamp(ts) => Ok(WireValue::Date(format_timestamp(ts))),
            FieldValue::Bytes(_) => self.fault_wire(
                path,
                CodecError::UnsupportedValueType(value.kind()),
                report,
            ),
        }
    }

    /// Encodes one document snapshot into a wire object.
    ///
    /// `path` is always present. `data` is present only when the document
    /// exists (an existing empty document yields an empty object, which is
    /// distinct from no `data` key at all). `metadata` is present only when
    /// the client attached one.
    pub fn encode_document(
        &self,
        snapshot: &DocumentSnapshot,
        report: &mut CodecReport,
    ) -> Result<WireValue, CodecError> {
        self.encode_document_at("", snapshot, report)
    }

    fn encode_document_at(
        &self,
        prefix: &str,
        snapshot: &DocumentSnapshot,
        report: &mut CodecReport,
    ) -> Result<WireValue, CodecError> {
        let mut out = IndexMap::new();
        out.insert(
            "path".to_string(),
            WireValue::String(snapshot.path.clone()),
        );
        if let Some(data) = &snapshot.data {
            let mut fields = IndexMap::with_capacity(data.len());
            for (k, v) in data {
                fields.insert(k.clone(), self.encode_at(&child_key(prefix, k), v, report)?);
            }
            out.insert("data".to_string(), WireValue::Object(fields));
        }
        if let Some(meta) = &snapshot.metadata {
            out.insert("metadata".to_string(), metadata_to_wire(meta));
        }
        Ok(WireValue::Object(out))
    }

    /// Encodes a query result: `documents` in result-set order, `changes`
    /// as the ordered diff, `metadata` when present.
    pub fn encode_query(
        &self,
        snapshot: &QuerySnapshot,
        report: &mut CodecReport,
    ) -> Result<WireValue, CodecError> {
        let mut documents = Vec::with_capacity(snapshot.documents.len());
        for (i, doc) in snapshot.documents.iter().enumerate() {
            documents.push(self.encode_document_at(&format!("documents[{i}]"), doc, report)?);
        }

        let mut changes = Vec::with_capacity(snapshot.changes.len());
        for (i, change) in snapshot.changes.iter().enumerate() {
            let mut row = IndexMap::new();
            row.insert(
                "type".to_string(),
                WireValue::String(change.change_type.as_wire_str().to_string()),
            );
            row.insert(
                "document".to_string(),
                self.encode_document_at(
                    &format!("changes[{i}].document"),
                    &change.document,
                    report,
                )?,
            );
            row.insert(
                "newIndex".to_string(),
                WireValue::Number(f64::from(change.new_index)),
            );
            row.insert(
                "oldIndex".to_string(),
                WireValue::Number(f64::from(change.old_index)),
            );
            changes.push(WireValue::Object(row));
        }

        let mut out = IndexMap::new();
        out.insert("documents".to_string(), WireValue::Array(documents));
        out.insert("changes".to_string(), WireValue::Array(changes));
        if let Some(meta) = &snapshot.metadata {
            out.insert("metadata".to_string(), metadata_to_wire(meta));
        }
        Ok(WireValue::Object(out))
    }
}

fn metadata_to_wire(meta: &SnapshotMetadata) -> WireValue {
    let mut map = IndexMap::new();
    map.insert(
        "fromCache".to_string(),
        WireValue::Boolean(meta.from_cache),
    );
    map.insert(
        "hasPendingWrites".to_string(),
        WireValue::Boolean(meta.has_pending_writes),
    );
    WireValue::Object(map)
}
