//! Point-in-time read types delivered by the database client.
//!
//! These are plain data carriers constructed by the client adapter; the
//! codec turns them into wire objects (see `codec::encode`).

use indexmap::IndexMap;

use crate::value::FieldValue;

/// Cache/pending-write status attached to a snapshot, when the client
/// provides one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotMetadata {
    pub from_cache: bool,
    pub has_pending_writes: bool,
}

/// One document's existence, field data, and metadata.
///
/// `data: None` means the document does not exist; `Some` with an empty map
/// means it exists with no fields. The two are distinct on the wire: a
/// non-existent document's encoding carries no `data` key at all.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    pub path: String,
    pub data: Option<IndexMap<String, FieldValue>>,
    pub metadata: Option<SnapshotMetadata>,
}

impl DocumentSnapshot {
    pub fn exists(&self) -> bool {
        self.data.is_some()
    }
}

/// Kind of membership change within a query result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Added,
    Removed,
    Modified,
}

impl ChangeType {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::Modified => "modified",
        }
    }
}

/// One entry of the ordered diff since the previously observed result.
///
/// Index sentinels from the client (typically −1 for "not applicable") pass
/// through to the wire unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentChange {
    pub change_type: ChangeType,
    pub document: DocumentSnapshot,
    pub new_index: i32,
    pub old_index: i32,
}

/// A query result: ordered document list plus the ordered change list.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    pub documents: Vec<DocumentSnapshot>,
    pub changes: Vec<DocumentChange>,
    pub metadata: Option<SnapshotMetadata>,
}
