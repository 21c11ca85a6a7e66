//! Sweep operation reporting and progress callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// How the selected files were emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Plain copies under an output directory.
    Mirror,
    /// One password-encrypted archive.
    Archive,
}

impl OutputMode {
    /// Lowercase name used in logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mirror => "mirror",
            Self::Archive => "archive",
        }
    }
}

/// What an output sink wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Files written to the output.
    pub files_written: usize,
    /// Plaintext bytes read from the selected files.
    pub bytes_written: u64,
}

/// Report of a complete scan-and-emit run.
///
/// # Examples
///
/// ```
/// use keysweep_core::OutputMode;
/// use keysweep_core::SweepReport;
///
/// let report = SweepReport::new(OutputMode::Archive, "secrets.zip");
/// assert_eq!(report.files_selected, 0);
/// assert_eq!(report.summary(), "Found 0 files");
/// ```
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// Output strategy used.
    pub mode: OutputMode,

    /// Output directory or archive path.
    pub output: PathBuf,

    /// Files chosen by the walk.
    pub files_selected: usize,

    /// Files written by the sink.
    pub files_written: usize,

    /// Plaintext bytes copied.
    pub bytes_written: u64,

    /// Wall time for walk plus write.
    pub duration: Duration,
}

impl SweepReport {
    /// Creates an empty report for `mode` writing to `output`.
    #[must_use]
    pub fn new(mode: OutputMode, output: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            output: output.into(),
            files_selected: 0,
            files_written: 0,
            bytes_written: 0,
            duration: Duration::ZERO,
        }
    }

    /// Folds a sink's write counts into this report.
    pub fn record_write(&mut self, write: &WriteReport) {
        self.files_written = write.files_written;
        self.bytes_written = write.bytes_written;
    }

    /// One-line human summary, e.g. `Found 3 files`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Found {} files", self.files_selected)
    }
}

/// Callback trait for progress reporting while files are written.
///
/// The trait requires `Send` so a callback can be moved to another thread by
/// the caller.
///
/// # Examples
///
/// ```
/// use keysweep_core::ProgressCallback;
/// use std::path::Path;
///
/// struct Printer;
///
/// impl ProgressCallback for Printer {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before a file is written.
    ///
    /// # Arguments
    ///
    /// * `path` - Root-relative path of the file
    /// * `total` - Number of files being written
    /// * `current` - Current file number (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for each chunk copied.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after a file has been fully written.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once after the output has been finalized.
    fn on_complete(&mut self);
}

/// Progress callback that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
