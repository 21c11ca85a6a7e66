//! Plain-copy output that mirrors the scan root's layout.

use super::OutputSink;
use crate::KeysweepError;
use crate::OutputMode;
use crate::ProgressCallback;
use crate::Result;
use crate::Selection;
use crate::WriteReport;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info_span;

/// Copies selected files under an output directory, preserving each file's
/// path relative to the scan root.
///
/// With `overwrite` disabled every destination is checked before any byte is
/// written, so a collision leaves the output untouched. Files are still opened
/// with `create_new`, so a destination that appears after the check is never
/// clobbered. An I/O failure partway through leaves earlier copies in place.
///
/// # Examples
///
/// ```no_run
/// use keysweep_core::NoopProgress;
/// use keysweep_core::PatternSet;
/// use keysweep_core::sink::MirrorCopySink;
/// use keysweep_core::sink::OutputSink;
/// use keysweep_core::walker::TreeWalker;
/// use std::path::Path;
///
/// let policy = PatternSet::default().compile()?;
/// let selection = TreeWalker::new(Path::new("."), &policy).walk()?;
/// let report = MirrorCopySink::new("/tmp/found", false).write(&selection, &mut NoopProgress)?;
/// println!("copied {} files", report.files_written);
/// # Ok::<(), keysweep_core::KeysweepError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MirrorCopySink {
    output_dir: PathBuf,
    overwrite: bool,
}

impl MirrorCopySink {
    /// Creates a sink writing under `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            overwrite,
        }
    }

    /// Destination of a file with the given root-relative path.
    #[must_use]
    pub fn destination(&self, relative: &Path) -> PathBuf {
        self.output_dir.join(relative)
    }

    /// Returns the first destination in selection order that already exists.
    fn find_conflict(&self, selection: &Selection) -> Option<PathBuf> {
        selection
            .files()
            .iter()
            .map(|f| self.destination(&f.relative))
            .find(|dest| dest.symlink_metadata().is_ok())
    }

    fn open_destination(&self, dest: &Path) -> Result<File> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| KeysweepError::WriteFile {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut options = OpenOptions::new();
        options.write(true);
        if self.overwrite {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        options.open(dest).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                KeysweepError::AlreadyExists {
                    path: dest.to_path_buf(),
                }
            } else {
                KeysweepError::WriteFile {
                    path: dest.to_path_buf(),
                    source: e,
                }
            }
        })
    }
}

impl OutputSink for MirrorCopySink {
    fn write(
        &self,
        selection: &Selection,
        progress: &mut dyn ProgressCallback,
    ) -> Result<WriteReport> {
        let _span = info_span!("mirror", output = %self.output_dir.display()).entered();

        if !self.overwrite
            && let Some(path) = self.find_conflict(selection)
        {
            return Err(KeysweepError::AlreadyExists { path });
        }

        fs::create_dir_all(&self.output_dir).map_err(|e| KeysweepError::WriteFile {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let mut report = WriteReport::default();
        let mut buffer = CopyBuffer::new();
        let total = selection.len();

        for (idx, file) in selection.files().iter().enumerate() {
            progress.on_entry_start(&file.relative, total, idx + 1);

            let dest = self.destination(&file.relative);
            let mut input = File::open(&file.path).map_err(|e| KeysweepError::ReadFile {
                path: file.path.clone(),
                source: e,
            })?;
            let mut output = self.open_destination(&dest)?;

            let bytes = copy_with_progress(&mut input, &mut output, &mut buffer, progress)
                .map_err(|e| KeysweepError::Copy {
                    path: file.path.clone(),
                    source: e,
                })?;

            debug!(from = %file.path.display(), to = %dest.display(), bytes, "copied");
            report.files_written += 1;
            report.bytes_written += bytes;
            progress.on_entry_complete(&file.relative);
        }

        progress.on_complete();
        Ok(report)
    }

    fn mode(&self) -> OutputMode {
        OutputMode::Mirror
    }

    fn target(&self) -> &Path {
        &self.output_dir
    }
}
