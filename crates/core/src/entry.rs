//! File entry model
//!
//! A `FileEntry` describes one local file or one remote object under a
//! uniform identity. The relative path is the join key between the local
//! and remote namespaces; it always uses `/` separators.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// One local file or one remote object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the sync root, `/`-separated
    pub rel_path: String,

    /// Size in bytes
    pub size: i64,

    /// Modification timestamp, truncated to whole seconds.
    /// S3 listings carry second precision, so local timestamps are
    /// truncated to match and keep the comparison symmetric.
    pub modified: Option<Timestamp>,
}

impl FileEntry {
    /// Create a new entry
    pub fn new(rel_path: impl Into<String>, size: i64, modified: Option<Timestamp>) -> Self {
        Self {
            rel_path: rel_path.into(),
            size,
            modified,
        }
    }

    /// Whether the remote copy of `self` is stale and needs re-uploading.
    ///
    /// Staleness policy: a size mismatch is always stale. With equal sizes,
    /// the entry is stale when the local timestamp is strictly newer than
    /// the remote one. An unknown timestamp on either side compares as
    /// not-newer, leaving size as the only signal.
    pub fn is_newer_than(&self, other: &FileEntry) -> bool {
        if self.size != other.size {
            return true;
        }
        match (self.modified, other.modified) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        }
    }
}
