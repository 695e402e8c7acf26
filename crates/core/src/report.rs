//! Run results and summary
//!
//! Every executed action produces exactly one `ActionResult`; the summary
//! tallies them by kind and outcome and decides the run's exit status.

use serde::Serialize;

use crate::plan::Action;

/// Outcome of one executed action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failure { reason: String },
}

/// One action together with its execution outcome
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub action: Action,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ActionResult {
    pub fn success(action: Action) -> Self {
        Self {
            action,
            outcome: Outcome::Success,
        }
    }

    pub fn failure(action: Action, reason: impl Into<String>) -> Self {
        Self {
            action,
            outcome: Outcome::Failure {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure { .. })
    }
}

/// Per-kind success/failure counts for a completed run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub uploaded: usize,
    pub downloaded: usize,
    pub deleted: usize,
    pub failed: usize,

    /// Bytes successfully uploaded
    pub bytes_uploaded: u64,

    /// Bytes successfully downloaded
    pub bytes_downloaded: u64,

    /// Messages for each failed action, in completion order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<String>,
}

impl RunSummary {
    /// Tally all results of a run
    pub fn from_results(results: &[ActionResult]) -> Self {
        let mut summary = Self::default();

        for result in results {
            match &result.outcome {
                Outcome::Success => match &result.action {
                    Action::Upload(entry) => {
                        summary.uploaded += 1;
                        summary.bytes_uploaded += entry.size.max(0) as u64;
                    }
                    Action::Download(entry) => {
                        summary.downloaded += 1;
                        summary.bytes_downloaded += entry.size.max(0) as u64;
                    }
                    Action::Delete { .. } => summary.deleted += 1,
                },
                Outcome::Failure { reason } => {
                    summary.failed += 1;
                    summary.failures.push(format!("{}: {reason}", result.action));
                }
            }
        }

        summary
    }

    /// A run succeeds iff no action failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Total number of actions attempted
    pub fn total(&self) -> usize {
        self.uploaded + self.downloaded + self.deleted + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::FileEntry;

    fn upload(path: &str, size: i64) -> Action {
        Action::Upload(FileEntry::new(path, size, None))
    }

    #[test]
    fn test_summary_tallies_by_kind() {
        let results = vec![
            ActionResult::success(upload("a.txt", 10)),
            ActionResult::success(upload("b.txt", 20)),
            ActionResult::success(Action::Delete {
                rel_path: "c.txt".into(),
            }),
            ActionResult::failure(upload("d.txt", 5), "connection reset"),
        ];

        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.uploaded, 2);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.bytes_uploaded, 30);
        assert_eq!(summary.total(), 4);
        assert!(!summary.is_success());
        assert_eq!(summary.failures, ["upload d.txt: connection reset"]);
    }

    #[test]
    fn test_empty_run_is_success() {
        let summary = RunSummary::from_results(&[]);
        assert!(summary.is_success());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_download_bytes_counted() {
        let results = vec![ActionResult::success(Action::Download(FileEntry::new(
            "a.txt", 42, None,
        )))];
        let summary = RunSummary::from_results(&results);
        assert_eq!(summary.downloaded, 1);
        assert_eq!(summary.bytes_downloaded, 42);
        assert!(summary.is_success());
    }
}
