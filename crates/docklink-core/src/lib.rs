//! Core primitives for the docklink platform bridge: the typed value codec
//! between native document-database values and the tagged wire format the
//! cross-platform host consumes.

pub mod codec;
pub mod snapshot;
pub mod value;
pub mod wire;

pub use codec::{Codec, CodecError, CodecReport, FaultPolicy, FieldFault};
pub use snapshot::{
    ChangeType, DocumentChange, DocumentSnapshot, QuerySnapshot, SnapshotMetadata,
};
pub use value::{DocumentRef, FieldValue, GeoPoint, ReferenceResolver};
pub use wire::{WireError, WireValue};

/// Returns the crate version at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
