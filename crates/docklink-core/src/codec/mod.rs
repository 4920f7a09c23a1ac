//! Bidirectional typed value codec.
//!
//! Encode (native → wire) lives in `encode`, decode (wire → native) in
//! `decode`. The codec is a pure, synchronous, reentrant function of its
//! input: no I/O, no locks, no state beyond the configured fault policy.
//! Recursion depth is bounded by the depth of the input document, which the
//! source database bounds itself.

mod decode;
mod encode;

use thiserror::Error;

use crate::wire::{WireError, WireValue};

/// What to do when a single field cannot be converted.
///
/// `Degrade` substitutes a `null` for the offending field, records the
/// fault, and lets the surrounding document complete — availability over
/// completeness, matching the platform bridge this replaces. `Strict`
/// fails the whole call on the first fault. Pick per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultPolicy {
    #[default]
    Degrade,
    Strict,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot encode native value of kind {0}")]
    UnsupportedValueType(&'static str),
    #[error("invalid timestamp payload: {0:?}")]
    InvalidTimestampFormat(String),
    #[error("unknown wire type: {0}")]
    UnknownWireType(String),
    #[error("malformed wire payload: {0}")]
    MalformedPayload(String),
}

impl From<WireError> for CodecError {
    fn from(err: WireError) -> Self {
        match err {
            WireError::UnknownWireType(tag) => CodecError::UnknownWireType(tag),
            WireError::MalformedPayload(tag) => CodecError::MalformedPayload(tag.to_string()),
            WireError::NotATypeMap => {
                CodecError::MalformedPayload("expected a tagged object".to_string())
            }
        }
    }
}

/// One degraded field: where it was and why.
#[derive(Debug)]
pub struct FieldFault {
    /// Dotted field path (`orders[2].total`); empty for the root value.
    pub path: String,
    pub error: CodecError,
}

/// Per-call diagnostics accumulator. Degrade-mode substitutions land here
/// so callers can surface partial-conversion telemetry.
#[derive(Debug, Default)]
pub struct CodecReport {
    faults: Vec<FieldFault>,
}

impl CodecReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn faults(&self) -> &[FieldFault] {
        &self.faults
    }

    fn record(&mut self, path: &str, error: CodecError) {
        self.faults.push(FieldFault {
            path: path.to_string(),
            error,
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Codec {
    policy: FaultPolicy,
}

impl Codec {
    pub fn new(policy: FaultPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Resolves a per-field fault on the wire side: degrade to a null tag
    /// or abort, per policy.
    fn fault_wire(
        &self,
        path: &str,
        error: CodecError,
        report: &mut CodecReport,
    ) -> Result<WireValue, CodecError> {
        match self.policy {
            FaultPolicy::Strict => Err(error),
            FaultPolicy::Degrade => {
                log::warn!("degrading field {path:?} to null: {error}");
                report.record(path, error);
                Ok(WireValue::Null)
            }
        }
    }

    /// Resolves a per-field fault on the native side.
    fn fault_native(
        &self,
        path: &str,
        error: CodecError,
        report: &mut CodecReport,
    ) -> Result<crate::value::FieldValue, CodecError> {
        match self.policy {
            FaultPolicy::Strict => Err(error),
            FaultPolicy::Degrade => {
                log::warn!("degrading field {path:?} to null: {error}");
                report.record(path, error);
                Ok(crate::value::FieldValue::Null)
            }
        }
    }
}

/// Extends a dotted field path with a map key.
fn child_key(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Extends a dotted field path with an array index.
fn child_index(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers_compose() {
        assert_eq!(child_key("", "a"), "a");
        assert_eq!(child_key("a", "b"), "a.b");
        assert_eq!(child_index("a.b", 2), "a.b[2]");
        assert_eq!(child_index("", 0), "[0]");
    }

    #[test]
    fn report_starts_clean() {
        let report = CodecReport::new();
        assert!(report.is_clean());
        assert!(report.faults().is_empty());
    }
}
