//! Reconciler
//!
//! Compares a local listing against a remote listing and produces the
//! action list for a run. Sync mode plans uploads (and, with deletion
//! enabled, removal of remote orphans); restore mode plans downloads only
//! and never deletes, so a restore can never destroy local data.
//!
//! Both input listings are already exclude-filtered, so no path produced
//! here can match an exclude pattern. Each relative path appears in at
//! most one action per run: uploads and deletes target disjoint key sets
//! by construction.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::entry::FileEntry;

/// One transfer or delete operation, consumed exactly once by the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Upload a local file to the container
    Upload(FileEntry),

    /// Download a remote object into the local tree
    Download(FileEntry),

    /// Delete a remote object
    Delete { rel_path: String },
}

impl Action {
    /// The relative path this action targets
    pub fn rel_path(&self) -> &str {
        match self {
            Action::Upload(entry) | Action::Download(entry) => &entry.rel_path,
            Action::Delete { rel_path } => rel_path,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Upload(e) => write!(f, "upload {}", e.rel_path),
            Action::Download(e) => write!(f, "download {}", e.rel_path),
            Action::Delete { rel_path } => write!(f, "delete {rel_path}"),
        }
    }
}

/// Plan a sync run (local → remote).
///
/// Emits `Upload` for every local entry that is absent remotely or whose
/// remote copy is stale (see `FileEntry::is_newer_than` for the policy).
/// With `delete` set, emits `Delete` for every remote entry with no local
/// counterpart. Actions are sorted by path within kind, uploads first,
/// for deterministic output.
pub fn plan_sync(local: &[FileEntry], remote: &[FileEntry], delete: bool) -> Vec<Action> {
    let remote_by_path: HashMap<&str, &FileEntry> =
        remote.iter().map(|e| (e.rel_path.as_str(), e)).collect();
    let local_paths: HashSet<&str> = local.iter().map(|e| e.rel_path.as_str()).collect();

    let mut uploads: Vec<Action> = local
        .iter()
        .filter(|l| match remote_by_path.get(l.rel_path.as_str()) {
            None => true,
            Some(r) => l.is_newer_than(r),
        })
        .map(|l| Action::Upload(l.clone()))
        .collect();
    uploads.sort_by(|a, b| a.rel_path().cmp(b.rel_path()));

    let mut actions = uploads;

    if delete {
        let mut deletes: Vec<Action> = remote
            .iter()
            .filter(|r| !local_paths.contains(r.rel_path.as_str()))
            .map(|r| Action::Delete {
                rel_path: r.rel_path.clone(),
            })
            .collect();
        deletes.sort_by(|a, b| a.rel_path().cmp(b.rel_path()));
        actions.extend(deletes);
    }

    actions
}

/// Plan a restore run (remote → local).
///
/// Emits `Download` for every remote entry that is absent locally or that
/// differs from the local copy under the same staleness policy as sync,
/// mirrored. Never emits `Delete`: restore is additive-only.
pub fn plan_restore(remote: &[FileEntry], local: &[FileEntry]) -> Vec<Action> {
    let local_by_path: HashMap<&str, &FileEntry> =
        local.iter().map(|e| (e.rel_path.as_str(), e)).collect();

    let mut downloads: Vec<Action> = remote
        .iter()
        .filter(|r| match local_by_path.get(r.rel_path.as_str()) {
            None => true,
            Some(l) => r.is_newer_than(l),
        })
        .map(|r| Action::Download(r.clone()))
        .collect();
    downloads.sort_by(|a, b| a.rel_path().cmp(b.rel_path()));

    downloads
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    fn entry(path: &str, size: i64, secs: i64) -> FileEntry {
        FileEntry::new(path, size, Some(Timestamp::from_second(secs).unwrap()))
    }

    fn paths(actions: &[Action]) -> Vec<String> {
        actions.iter().map(|a| a.to_string()).collect()
    }

    // local has a.txt (10B) and b.txt (20B); remote has b.txt (20B, same
    // timestamp) and c.txt.
    fn scenario() -> (Vec<FileEntry>, Vec<FileEntry>) {
        let local = vec![entry("a.txt", 10, 100), entry("b.txt", 20, 100)];
        let remote = vec![entry("b.txt", 20, 100), entry("c.txt", 5, 100)];
        (local, remote)
    }

    #[test]
    fn test_sync_without_delete() {
        let (local, remote) = scenario();
        let actions = plan_sync(&local, &remote, false);
        assert_eq!(paths(&actions), ["upload a.txt"]);
    }

    #[test]
    fn test_sync_with_delete() {
        let (local, remote) = scenario();
        let actions = plan_sync(&local, &remote, true);
        assert_eq!(paths(&actions), ["upload a.txt", "delete c.txt"]);
    }

    #[test]
    fn test_restore_is_additive_only() {
        let (local, remote) = scenario();
        let actions = plan_restore(&remote, &local);
        assert_eq!(paths(&actions), ["download c.txt"]);
    }

    #[test]
    fn test_stale_remote_is_reuploaded() {
        let local = vec![entry("a.txt", 10, 200)];
        let remote = vec![entry("a.txt", 10, 100)];
        let actions = plan_sync(&local, &remote, false);
        assert_eq!(paths(&actions), ["upload a.txt"]);
    }

    #[test]
    fn test_older_local_is_not_reuploaded() {
        let local = vec![entry("a.txt", 10, 100)];
        let remote = vec![entry("a.txt", 10, 200)];
        let actions = plan_sync(&local, &remote, false);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_changed_size_is_redownloaded_on_restore() {
        let local = vec![entry("a.txt", 10, 100)];
        let remote = vec![entry("a.txt", 12, 100)];
        let actions = plan_restore(&remote, &local);
        assert_eq!(paths(&actions), ["download a.txt"]);
    }

    #[test]
    fn test_idempotence() {
        // After a successful sync the two listings match, so a second
        // reconciliation yields an empty plan.
        let listing = vec![entry("a.txt", 10, 100), entry("sub/b.txt", 20, 150)];
        assert!(plan_sync(&listing, &listing, true).is_empty());
        assert!(plan_restore(&listing, &listing).is_empty());
    }

    #[test]
    fn test_uploads_and_deletes_never_share_a_path() {
        let local = vec![entry("a.txt", 10, 200)];
        let remote = vec![entry("a.txt", 10, 100), entry("b.txt", 5, 100)];
        let actions = plan_sync(&local, &remote, true);

        let mut seen = std::collections::HashSet::new();
        for action in &actions {
            assert!(seen.insert(action.rel_path().to_string()));
        }
        assert_eq!(paths(&actions), ["upload a.txt", "delete b.txt"]);
    }

    #[test]
    fn test_plan_is_sorted_for_determinism() {
        let local = vec![entry("z.txt", 1, 100), entry("a.txt", 1, 100)];
        let actions = plan_sync(&local, &[], false);
        assert_eq!(paths(&actions), ["upload a.txt", "upload z.txt"]);
    }
}
