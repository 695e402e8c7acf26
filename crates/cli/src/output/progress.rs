//! Progress bar for transfer execution
//!
//! Tracks completed actions out of the planned total. Suppressed in
//! quiet, JSON, or --no-progress mode.

use super::OutputConfig;

/// Action-count progress bar wrapper
#[derive(Debug, Clone)]
pub struct ActionProgress {
    bar: Option<indicatif::ProgressBar>,
}

impl ActionProgress {
    /// Create a progress bar over `total` planned actions
    pub fn new(config: &OutputConfig, total: u64) -> Self {
        let bar = if config.quiet || config.json || config.no_progress {
            None
        } else {
            let bar = indicatif::ProgressBar::new(total);
            bar.set_style(
                indicatif::ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .expect("valid template")
                    .progress_chars("#>-"),
            );
            Some(bar)
        };

        Self { bar }
    }

    /// Record one completed action
    pub fn inc(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
            bar.inc(1);
        }
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
