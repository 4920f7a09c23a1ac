use docklink_core::{Codec, CodecReport, DocumentRef, ReferenceResolver, WireValue};
use docklink_links as links;

/// Resolver for host-supplied payloads. There is no live database client on
/// this side of the boundary, so handles keep their path only.
struct PathResolver;

impl ReferenceResolver for PathResolver {
    fn document(&self, path: &str) -> DocumentRef {
        DocumentRef::new(path)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("malformed link parameters: {0}")]
    MalformedParameters(String),
    #[error("link failure: {0}")]
    Failure(String),
}

pub fn version() -> String {
    docklink_core::version().to_owned()
}

/// Parses host wire JSON, decodes it, and re-encodes the result. Unknown
/// tags and unparsable dates degrade to null-tagged fields per the default
/// codec policy, so the output is always a clean wire value.
pub fn normalize_wire_value(wire_json: String) -> String {
    let payload: serde_json::Value =
        serde_json::from_str(&wire_json).expect("invalid JSON input");
    let codec = Codec::default();
    let mut report = CodecReport::new();
    let native = codec
        .decode_json(&payload, &PathResolver, &mut report)
        .expect("degrade-mode decode cannot fail");
    let wire = codec
        .encode(&native, &mut report)
        .expect("degrade-mode encode cannot fail");
    wire.to_json().to_string()
}

/// Untyped plain-JSON view of a wire value, for host-side debugging.
pub fn wire_view(wire_json: String) -> String {
    let payload: serde_json::Value =
        serde_json::from_str(&wire_json).expect("invalid JSON input");
    let wire = WireValue::from_json(&payload).expect("invalid wire value");
    wire.to_plain_json().to_string()
}

pub fn create_dynamic_link(params_json: String) -> Result<String, LinkError> {
    let params: serde_json::Value = serde_json::from_str(&params_json)
        .map_err(|err| LinkError::MalformedParameters(err.to_string()))?;
    links::create_dynamic_link(&params).map_err(|err| match err {
        links::LinkError::MalformedParameters(inner) => {
            LinkError::MalformedParameters(inner.to_string())
        }
        links::LinkError::Service(inner) => LinkError::Failure(inner.to_string()),
    })
}


uniffi::include_scaffolding!("docklink");
