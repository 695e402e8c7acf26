//! Output formatting utilities
//!
//! Formatters for CLI output in both human-readable and JSON formats,
//! the action progress bar, and the run summary table.

mod formatter;
mod progress;
mod summary;

pub use formatter::Formatter;
pub use progress::ActionProgress;
pub use summary::render_summary;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Disable colored output
    pub no_color: bool,
    /// Disable progress bar
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}
