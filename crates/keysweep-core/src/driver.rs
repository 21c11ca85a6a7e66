//! High-level entry points: select, then emit.

use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::ScanConfig;
use crate::Selection;
use crate::SinkConfig;
use crate::SweepReport;
use crate::sink;
use crate::walker;
use std::time::Instant;
use tracing::info;

/// Walks `config.root` and returns the selected files without writing
/// anything.
///
/// # Errors
///
/// Returns an error if:
/// - The root is missing or not a directory
/// - A pattern is malformed
/// - A directory cannot be listed
///
/// # Examples
///
/// ```no_run
/// use keysweep_core::ScanConfig;
/// use keysweep_core::select_files;
///
/// let selection = select_files(&ScanConfig::new("."))?;
/// for file in selection.files() {
///     println!("{} ({} bytes)", file.path.display(), file.size);
/// }
/// # Ok::<(), keysweep_core::KeysweepError>(())
/// ```
pub fn select_files(config: &ScanConfig) -> Result<Selection> {
    walker::walk(config)
}

/// Selects files under `scan.root` and writes them with the sink described
/// by `output`.
///
/// # Errors
///
/// Any configuration, walk or write error is returned as-is. Nothing is
/// retried. The sink configuration is validated before the walk starts.
///
/// The sink's own target is left out of the selection, so an archive or
/// mirror directory inside the scan root is never swept into itself.
///
/// # Examples
///
/// ```no_run
/// use keysweep_core::ScanConfig;
/// use keysweep_core::SinkConfig;
/// use keysweep_core::sweep;
///
/// let report = sweep(
///     &ScanConfig::new("./project"),
///     &SinkConfig::archive("found.zip", "correct horse"),
/// )?;
/// println!("{}", report.summary());
/// # Ok::<(), keysweep_core::KeysweepError>(())
/// ```
pub fn sweep(scan: &ScanConfig, output: &SinkConfig) -> Result<SweepReport> {
    sweep_with_progress(scan, output, &mut NoopProgress)
}

/// Like [`sweep`], reporting write progress to `progress`.
pub fn sweep_with_progress(
    scan: &ScanConfig,
    output: &SinkConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<SweepReport> {
    let start = Instant::now();
    let sink = sink::build(output)?;

    let selection = walker::walk_excluding(scan, sink.target())?;
    let mut report = SweepReport::new(sink.mode(), sink.target());
    report.files_selected = selection.len();

    let written = sink.write(&selection, progress)?;
    report.record_write(&written);
    report.duration = start.elapsed();

    info!(
        mode = report.mode.as_str(),
        output = %report.output.display(),
        files = report.files_selected,
        bytes = report.bytes_written,
        "sweep complete"
    );

    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::KeysweepError;
    use crate::OutputMode;
    use std::fs;
    use tempfile::TempDir;

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("app/node_modules/pkg")).unwrap();
        fs::write(root.join("app/.env"), "DB=postgres://").unwrap();
        fs::write(root.join("app/node_modules/pkg/.env"), "nope").unwrap();
        fs::write(root.join("app/main.rs"), "fn main() {}").unwrap();
        temp
    }

    #[test]
    fn test_select_files_uses_defaults() {
        let temp = project();
        let selection = select_files(&ScanConfig::new(temp.path())).unwrap();
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.files()[0].relative, std::path::Path::new("app/.env"));
    }

    #[test]
    fn test_sweep_mirror() {
        let temp = project();
        let out = TempDir::new().unwrap();

        let report = sweep(
            &ScanConfig::new(temp.path()),
            &SinkConfig::mirror(out.path().join("copy")),
        )
        .unwrap();

        assert_eq!(report.mode, OutputMode::Mirror);
        assert_eq!(report.files_selected, 1);
        assert_eq!(report.files_written, 1);
        assert_eq!(report.summary(), "Found 1 files");
        assert!(out.path().join("copy/app/.env").exists());
    }

    #[test]
    fn test_sweep_archive() {
        let temp = project();
        let out = TempDir::new().unwrap();
        let archive = out.path().join("found.zip");

        let report = sweep(
            &ScanConfig::new(temp.path()),
            &SinkConfig::archive(&archive, "pw"),
        )
        .unwrap();

        assert_eq!(report.mode, OutputMode::Archive);
        assert_eq!(report.output, archive);
        assert_eq!(report.bytes_written, 14);
        assert!(archive.exists());
    }

    #[test]
    fn test_repeated_archive_inside_root_never_contains_itself() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("big.key"), "k".repeat(4096)).unwrap();
        let scan = ScanConfig::new(root);
        let output = SinkConfig::archive(root.join("secrets.zip"), "pw");

        let first = sweep(&scan, &output).unwrap();
        assert_eq!(first.files_selected, 1);

        let second = sweep(&scan, &output).unwrap();
        assert_eq!(second.files_selected, 1);
        assert_eq!(second.bytes_written, 4096);

        let archive =
            zip::ZipArchive::new(fs::File::open(root.join("secrets.zip")).unwrap()).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names, vec!["big.key"]);
    }

    #[test]
    fn test_repeated_mirror_inside_root_does_not_nest() {
        let temp = project();
        let root = temp.path();
        let output = SinkConfig::mirror(root.join("out")).with_overwrite(true);

        sweep(&ScanConfig::new(root), &output).unwrap();
        let second = sweep(&ScanConfig::new(root), &output).unwrap();

        assert_eq!(second.files_selected, 1);
        assert!(root.join("out/app/.env").exists());
        assert!(!root.join("out/out").exists());
    }

    #[test]
    fn test_sweep_validates_sink_before_walking() {
        let out = TempDir::new().unwrap();
        let err = sweep(
            &ScanConfig::new(out.path().join("missing-root")),
            &SinkConfig::archive(out.path().join("x.zip"), ""),
        )
        .unwrap_err();

        // Password error wins over the missing root because it is checked first.
        assert!(matches!(err, KeysweepError::InvalidConfig { .. }));
        assert!(!out.path().join("x.zip").exists());
    }

    #[test]
    fn test_sweep_surfaces_walk_errors() {
        let out = TempDir::new().unwrap();
        let err = sweep(
            &ScanConfig::new(out.path().join("missing-root")),
            &SinkConfig::mirror(out.path().join("copy")),
        )
        .unwrap_err();
        assert!(matches!(err, KeysweepError::SourceNotFound { .. }));
        assert!(!out.path().join("copy").exists());
    }
}
