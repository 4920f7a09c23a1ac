//! Wire → native direction: tagged wire values back into field values,
//! with reference resolution injected by the caller.

use indexmap::IndexMap;
use serde_json::Value;

use super::{child_index, child_key, Codec, CodecError, CodecReport};
use crate::value::{FieldValue, ReferenceResolver};
use crate::wire::{parse_timestamp, WireValue};

impl Codec {
    /// Decodes one wire value into its native form. The resolver is
    /// consulted only for `reference` tags.
    pub fn decode(
        &self,
        wire: &WireValue,
        resolver: &dyn ReferenceResolver,
        report: &mut CodecReport,
    ) -> Result<FieldValue, CodecError> {
        self.decode_at("", wire, resolver, report)
    }

    fn decode_at(
        &self,
        path: &str,
        wire: &WireValue,
        resolver: &dyn ReferenceResolver,
        report: &mut CodecReport,
    ) -> Result<FieldValue, CodecError> {
        match wire {
            WireValue::Null => Ok(FieldValue::Null),
            WireValue::Boolean(b) => Ok(FieldValue::Boolean(*b)),
            WireValue::Number(n) => Ok(FieldValue::Number(*n)),
            WireValue::String(s) => Ok(FieldValue::String(s.clone())),
            WireValue::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.decode_at(&child_index(path, i), item, resolver, report)?);
                }
                Ok(FieldValue::Array(out))
            }
            WireValue::Object(fields) => {
                let mut out = IndexMap::with_capacity(fields.len());
                for (k, v) in fields {
                    out.insert(
                        k.clone(),
                        self.decode_at(&child_key(path, k), v, resolver, report)?,
                    );
                }
                Ok(FieldValue::Map(out))
            }
            WireValue::Reference(doc_path) => {
                Ok(FieldValue::Reference(resolver.document(doc_path)))
            }
            WireValue::GeoPoint(gp) => Ok(FieldValue::GeoPoint(*gp)),
            WireValue::Date(raw) => match parse_timestamp(raw) {
                Ok(ts) => Ok(FieldValue::Timestamp(ts)),
                Err(_) => self.fault_native(
                    path,
                    CodecError::InvalidTimestampFormat(raw.clone()),
                    report,
                ),
            },
        }
    }

    /// Decodes an untyped JSON payload straight off the host boundary.
    ///
    /// Unlike [`WireValue::from_json`], which is all-or-nothing, this walks
    /// the tree itself so a single field with an unknown tag or malformed
    /// payload degrades to `Null` (under the default policy) without
    /// poisoning the rest of the document.
    pub fn decode_json(
        &self,
        payload: &Value,
        resolver: &dyn ReferenceResolver,
        report: &mut CodecReport,
    ) -> Result<FieldValue, CodecError> {
        self.decode_json_at("", payload, resolver, report)
    }

    fn decode_json_at(
        &self,
        path: &str,
        payload: &Value,
        resolver: &dyn ReferenceResolver,
        report: &mut CodecReport,
    ) -> Result<FieldValue, CodecError> {
        let Some(map) = payload.as_object() else {
            return self.fault_native(
                path,
                CodecError::MalformedPayload("expected a tagged object".to_string()),
                report,
            );
        };
        let Some(tag) = map.get("type").and_then(Value::as_str) else {
            return self.fault_native(
                path,
                CodecError::MalformedPayload("expected a tagged object".to_string()),
                report,
            );
        };
        let value = map.get("value").unwrap_or(&Value::Null);

        match tag {
            "array" => {
                let Some(items) = value.as_array() else {
                    return self.fault_native(
                        path,
                        CodecError::MalformedPayload("array".to_string()),
                        report,
                    );
                };
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    out.push(self.decode_json_at(&child_index(path, i), item, resolver, report)?);
                }
                Ok(FieldValue::Array(out))
            }
            "object" => {
                let Some(fields) = value.as_object() else {
                    return self.fault_native(
                        path,
                        CodecError::MalformedPayload("object".to_string()),
                        report,
                    );
                };
                let mut out = IndexMap::with_capacity(fields.len());
                for (k, child) in fields {
                    out.insert(
                        k.clone(),
                        self.decode_json_at(&child_key(path, k), child, resolver, report)?,
                    );
                }
                Ok(FieldValue::Map(out))
            }
            _ => match WireValue::from_json(payload) {
                Ok(wire) => self.decode_at(path, &wire, resolver, report),
                Err(err) => self.fault_native(path, err.into(), report),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FaultPolicy;
    use crate::value::DocumentRef;
    use serde_json::json;

    struct StubResolver;

    impl ReferenceResolver for StubResolver {
        fn document(&self, path: &str) -> DocumentRef {
            DocumentRef::new(path)
        }
    }

    #[test]
    fn reference_tag_goes_through_the_resolver() {
        let codec = Codec::default();
        let mut report = CodecReport::new();
        let native = codec
            .decode(
                &WireValue::Reference("users/ada".to_string()),
                &StubResolver,
                &mut report,
            )
            .unwrap();
        assert_eq!(
            native,
            FieldValue::Reference(DocumentRef::new("users/ada"))
        );
    }

    #[test]
    fn bad_date_degrades_to_null_and_is_recorded() {
        let codec = Codec::new(FaultPolicy::Degrade);
        let mut report = CodecReport::new();
        let native = codec
            .decode(
                &WireValue::Date("yesterday-ish".to_string()),
                &StubResolver,
                &mut report,
            )
            .unwrap();
        assert_eq!(native, FieldValue::Null);
        assert_eq!(report.faults().len(), 1);
        assert!(matches!(
            report.faults()[0].error,
            CodecError::InvalidTimestampFormat(_)
        ));
    }

    #[test]
    fn bad_date_aborts_under_strict_policy() {
        let codec = Codec::new(FaultPolicy::Strict);
        let mut report = CodecReport::new();
        let err = codec
            .decode(
                &WireValue::Date("yesterday-ish".to_string()),
                &StubResolver,
                &mut report,
            )
            .expect_err("strict policy should fail");
        assert!(matches!(err, CodecError::InvalidTimestampFormat(_)));
    }

    #[test]
    fn unknown_tag_in_host_json_degrades_only_that_field() {
        let codec = Codec::new(FaultPolicy::Degrade);
        let mut report = CodecReport::new();
        let payload = json!({
            "type": "object",
            "value": {
                "good": {"type": "number", "value": 1.0},
                "bad": {"type": "bogus", "value": 9},
            }
        });
        let native = codec
            .decode_json(&payload, &StubResolver, &mut report)
            .unwrap();
        let FieldValue::Map(fields) = native else {
            panic!("expected map");
        };
        assert_eq!(fields["good"], FieldValue::Number(1.0));
        assert_eq!(fields["bad"], FieldValue::Null);
        assert_eq!(report.faults().len(), 1);
        assert_eq!(report.faults()[0].path, "bad");
        assert!(matches!(
            report.faults()[0].error,
            CodecError::UnknownWireType(ref tag) if tag == "bogus"
        ));
    }

    #[test]
    fn untagged_host_json_is_a_malformed_payload() {
        let codec = Codec::new(FaultPolicy::Strict);
        let mut report = CodecReport::new();
        let err = codec
            .decode_json(&json!([1, 2, 3]), &StubResolver, &mut report)
            .expect_err("bare array is not a wire value");
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }
}
