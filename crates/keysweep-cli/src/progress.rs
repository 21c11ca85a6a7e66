//! Progress bar for sink writes.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use keysweep_core::ProgressCallback;
use std::path::Path;

/// CLI progress bar implementing `ProgressCallback`.
///
/// The bar length is the number of selected files, learned from the first
/// `on_entry_start`. The prefix shows plaintext bytes copied so far and the
/// message names the file being written.
pub struct CliProgress {
    bar: ProgressBar,
    action: String,
    bytes_written: u64,
}

impl CliProgress {
    /// Creates a progress bar labelled with `action` (e.g. "Copying").
    #[must_use]
    pub fn new(action: &str) -> Self {
        let bar = ProgressBar::new(0);

        // "Encrypting 1.2 MB [██████░░░░] 12/40 files .env"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} {prefix:>10} [{bar:40.cyan/blue}] {pos}/{len} files {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_prefix(format!("{action} {}", humanize_bytes(0)));

        Self {
            bar,
            action: action.to_string(),
            bytes_written: 0,
        }
    }

    /// Whether a bar should be drawn: stdout is a terminal and output is
    /// neither quiet nor JSON.
    #[must_use]
    pub fn should_show(quiet: bool, json: bool) -> bool {
        !quiet && !json && Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressCallback for CliProgress {
    fn on_entry_start(&mut self, path: &Path, total: usize, _current: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_message(path.display().to_string());
    }

    fn on_bytes_written(&mut self, bytes: u64) {
        self.bytes_written += bytes;
        self.bar
            .set_prefix(format!("{} {}", self.action, humanize_bytes(self.bytes_written)));
    }

    fn on_entry_complete(&mut self, _path: &Path) {
        self.bar.inc(1);
    }

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Converts bytes to human-readable format (KB, MB, GB, TB).
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
