//! Local directory scanner
//!
//! Walks a local directory tree and produces a `FileEntry` for every
//! regular file under it, applying exclude filtering. Symlinks and
//! non-regular files are skipped silently.

use std::path::Path;

use jiff::Timestamp;
use walkdir::WalkDir;

use crate::entry::FileEntry;
use crate::error::{Error, Result};
use crate::exclude::ExcludeSet;

/// Scan `root` recursively, returning entries for every regular file
/// whose relative path does not match an exclude pattern.
///
/// A missing or unreadable root is fatal: the reconciler needs a complete
/// local view, so no partial scan is usable.
pub fn scan(root: &Path, exclude: &ExcludeSet) -> Result<Vec<FileEntry>> {
    if !root.is_dir() {
        return Err(Error::NotFound(format!(
            "Directory not found: {}",
            root.display()
        )));
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| {
            Error::General(format!("Failed to scan {}: {e}", root.display()))
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let rel_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");

        if exclude.is_excluded(&rel_path) {
            tracing::debug!(path = %rel_path, "excluded from scan");
            continue;
        }

        let metadata = entry.metadata().map_err(|e| {
            Error::General(format!("Failed to stat {rel_path}: {e}"))
        })?;

        entries.push(FileEntry::new(
            rel_path,
            metadata.len() as i64,
            mtime_seconds(&metadata),
        ));
    }

    tracing::debug!(count = entries.len(), root = %root.display(), "local scan complete");

    Ok(entries)
}

/// Modification time truncated to whole seconds, matching the precision
/// of remote listings.
fn mtime_seconds(metadata: &std::fs::Metadata) -> Option<Timestamp> {
    let mtime = metadata.modified().ok()?;
    let secs = mtime
        .duration_since(std::time::UNIX_EPOCH)
        .ok()?
        .as_secs();
    Timestamp::from_second(secs as i64).ok()
}
