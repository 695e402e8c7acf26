//! Run summary rendering
//!
//! Renders the final per-kind tallies as a small table for human output.

use comfy_table::{presets::UTF8_BORDERS_ONLY, Cell, Table};
use humansize::{format_size, BINARY};

use cs_core::RunSummary;

/// Render a completed run's summary as a table
pub fn render_summary(summary: &RunSummary) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["", "Count", "Bytes"]);

    table.add_row(vec![
        Cell::new("Uploaded"),
        Cell::new(summary.uploaded),
        Cell::new(format_size(summary.bytes_uploaded, BINARY)),
    ]);
    table.add_row(vec![
        Cell::new("Downloaded"),
        Cell::new(summary.downloaded),
        Cell::new(format_size(summary.bytes_downloaded, BINARY)),
    ]);
    table.add_row(vec![
        Cell::new("Deleted"),
        Cell::new(summary.deleted),
        Cell::new("-"),
    ]);
    table.add_row(vec![
        Cell::new("Failed"),
        Cell::new(summary.failed),
        Cell::new("-"),
    ]);

    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::{Action, ActionResult, FileEntry};

    #[test]
    fn test_summary_table_contains_counts() {
        let results = vec![
            ActionResult::success(Action::Upload(FileEntry::new("a.txt", 2048, None))),
            ActionResult::failure(
                Action::Delete {
                    rel_path: "b.txt".into(),
                },
                "denied",
            ),
        ];
        let summary = RunSummary::from_results(&results);
        let rendered = render_summary(&summary);

        assert!(rendered.contains("Uploaded"));
        assert!(rendered.contains("2 KiB"));
        assert!(rendered.contains("Failed"));
    }
}
