//! Progress display for long driver runs

use crate::io::configuration::PROGRESS_THRESHOLD;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STEP_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Ticks: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over driver ticks
///
/// Stays hidden for short runs and in quiet mode, so small scripted runs
/// print only their result.
pub struct ProgressManager {
    bar: Option<ProgressBar>,
}

impl ProgressManager {
    /// Create a tracker for `total_ticks` ticks
    pub fn new(total_ticks: usize, quiet: bool) -> Self {
        let bar = (!quiet && total_ticks > PROGRESS_THRESHOLD).then(|| {
            let bar = ProgressBar::new(total_ticks as u64);
            bar.set_style(STEP_STYLE.clone());
            bar
        });
        Self { bar }
    }

    /// Whether a bar is being drawn
    pub const fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Record a finished tick and show the grid shape it produced
    pub fn tick(&self, rows: usize, columns: usize) {
        if let Some(ref bar) = self.bar {
            bar.set_message(format!("{rows}x{columns}"));
            bar.inc(1);
        }
    }

    /// Clear the bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
