//! Progress bar display for fetches

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a batch of repositories
pub struct ProgressDisplay {
    bar: ProgressBar,
}

impl ProgressDisplay {
    /// Create a progress display for `total` repositories.
    ///
    /// When `visible` is false nothing is drawn.
    pub fn new(total: u64, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new(total)
        } else {
            ProgressBar::hidden()
        };

        let style = ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);

        Self { bar }
    }

    /// Show which repository is being worked on
    pub fn start(&self, identifier: &str) {
        self.bar.set_message(identifier.to_string());
    }

    /// Mark one repository as done
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.bar.abandon();
    }
}
