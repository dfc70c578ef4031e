//! Progress display for corpus imports

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static IMPORT_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the records of a corpus import
pub struct ImportProgress {
    bar: ProgressBar,
}

impl ImportProgress {
    /// Progress bar drawn to stderr
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(IMPORT_STYLE.clone());
        bar.set_message("Importing");
        Self { bar }
    }

    /// Progress tracker that never draws
    pub fn hidden(total: u64) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::hidden());
        Self { bar }
    }

    /// Record that `written` records have been stored so far
    pub fn set_written(&self, written: u64) {
        self.bar.set_position(written);
    }

    /// Records stored so far
    pub fn written(&self) -> u64 {
        self.bar.position()
    }

    /// Total records expected
    pub fn total(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Close the bar with a final message
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}
