//! Password-encrypted ZIP output.
//!
//! Each entry is encrypted on its own with WinZip AES-256, so any entry can be
//! decrypted independently with the same password.

use super::OutputSink;
use crate::KeysweepError;
use crate::OutputMode;
use crate::ProgressCallback;
use crate::Result;
use crate::Selection;
use crate::WriteReport;
use crate::config::DEFAULT_COMPRESSION_LEVEL;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_progress;
use crate::patterns::to_slash;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info_span;
use zip::AesMode;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes selected files into one AES-256 encrypted ZIP archive.
///
/// Entries are named by their `/`-separated path relative to the scan root
/// and written in selection order. The archive is truncated if it exists. A
/// failure partway through leaves an incomplete archive on disk.
///
/// # Examples
///
/// ```no_run
/// use keysweep_core::NoopProgress;
/// use keysweep_core::PatternSet;
/// use keysweep_core::sink::EncryptedArchiveSink;
/// use keysweep_core::sink::OutputSink;
/// use keysweep_core::walker::TreeWalker;
/// use std::path::Path;
///
/// let policy = PatternSet::default().compile()?;
/// let selection = TreeWalker::new(Path::new("."), &policy).walk()?;
/// EncryptedArchiveSink::new("found.zip", "correct horse").write(&selection, &mut NoopProgress)?;
/// # Ok::<(), keysweep_core::KeysweepError>(())
/// ```
#[derive(Clone)]
pub struct EncryptedArchiveSink {
    path: PathBuf,
    password: String,
    compression_level: u8,
}

impl std::fmt::Debug for EncryptedArchiveSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedArchiveSink")
            .field("path", &self.path)
            .field("compression_level", &self.compression_level)
            .finish_non_exhaustive()
    }
}

impl EncryptedArchiveSink {
    /// Creates a sink writing to `path`, encrypting with `password`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            password: password.into(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets the deflate level (1-9).
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    fn create_archive_file(&self) -> Result<File> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| KeysweepError::WriteFile {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        File::create(&self.path).map_err(|e| KeysweepError::WriteFile {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl OutputSink for EncryptedArchiveSink {
    fn write(
        &self,
        selection: &Selection,
        progress: &mut dyn ProgressCallback,
    ) -> Result<WriteReport> {
        let _span = info_span!("archive", path = %self.path.display()).entered();

        if self.password.is_empty() {
            return Err(KeysweepError::config("encryption password must be provided"));
        }
        if !(1..=9).contains(&self.compression_level) {
            return Err(KeysweepError::InvalidCompressionLevel {
                level: self.compression_level,
            });
        }

        let file = self.create_archive_file()?;
        let mut zip = ZipWriter::new(BufWriter::new(file));

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(self.compression_level)))
            .unix_permissions(0o600)
            .with_aes_encryption(AesMode::Aes256, &self.password);

        let mut report = WriteReport::default();
        let mut buffer = CopyBuffer::new();
        let total = selection.len();

        for (idx, entry) in selection.files().iter().enumerate() {
            progress.on_entry_start(&entry.relative, total, idx + 1);

            let mut input = File::open(&entry.path).map_err(|e| KeysweepError::ReadFile {
                path: entry.path.clone(),
                source: e,
            })?;

            let name = to_slash(&entry.relative);
            zip.start_file(name.as_str(), options)
                .map_err(|e| match e {
                    zip::result::ZipError::Io(io) => KeysweepError::Io(io),
                    other => KeysweepError::Encryption {
                        path: entry.relative.clone(),
                        reason: other.to_string(),
                    },
                })?;

            let bytes = copy_with_progress(&mut input, &mut zip, &mut buffer, progress).map_err(
                |e| KeysweepError::Copy {
                    path: entry.path.clone(),
                    source: e,
                },
            )?;

            debug!(entry = %name, bytes, "added encrypted entry");
            report.files_written += 1;
            report.bytes_written += bytes;
            progress.on_entry_complete(&entry.relative);
        }

        let mut writer = zip
            .finish()
            .map_err(|e| KeysweepError::from_zip(e, "failed to finish archive"))?;
        writer.flush()?;

        progress.on_complete();
        Ok(report)
    }

    fn mode(&self) -> OutputMode {
        OutputMode::Archive
    }

    fn target(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Allow unwrap in tests for brevity
mod tests {
    use super::*;
    use crate::NoopProgress;
    use std::io::Read;
    use tempfile::TempDir;

    fn selection_of(root: &Path, files: &[(&str, &[u8])]) -> Selection {
        let mut paths = Vec::new();
        for (rel, content) in files {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, content).unwrap();
            paths.push(path);
        }
        Selection::from_paths(root, &paths).unwrap()
    }

    fn read_entry(archive: &Path, name: &str, password: &str) -> Option<Vec<u8>> {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        let Ok(mut file) = zip.by_name_decrypt(name, password.as_bytes()) else {
            return None;
        };
        let mut data = Vec::new();
        file.read_to_end(&mut data).ok()?;
        Some(data)
    }

    #[test]
    fn test_archive_roundtrip() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let archive = out.path().join("found.zip");

        let selection = selection_of(
            src.path(),
            &[("a/.env", b"TOKEN=abc"), ("keys/deploy.pem", b"-----BEGIN-----")],
        );

        let report = EncryptedArchiveSink::new(&archive, "s3cret")
            .write(&selection, &mut NoopProgress)
            .unwrap();

        assert_eq!(report.files_written, 2);
        assert_eq!(report.bytes_written, 24);
        assert_eq!(read_entry(&archive, "a/.env", "s3cret").unwrap(), b"TOKEN=abc");
        assert_eq!(
            read_entry(&archive, "keys/deploy.pem", "s3cret").unwrap(),
            b"-----BEGIN-----"
        );
    }

    #[test]
    fn test_archive_entries_are_encrypted() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let archive = out.path().join("found.zip");

        let selection = selection_of(src.path(), &[("id_rsa", b"PRIVATE")]);
        EncryptedArchiveSink::new(&archive, "pw")
            .write(&selection, &mut NoopProgress)
            .unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert!(zip.by_name("id_rsa").is_err(), "entry must require a password");
        assert_eq!(read_entry(&archive, "id_rsa", "wrong"), None);
    }

    #[test]
    fn test_archive_preserves_selection_order() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let archive = out.path().join("found.zip");

        let selection = selection_of(
            src.path(),
            &[("z.key", b"z"), ("a.key", b"a"), ("m/m.key", b"m")],
        );
        EncryptedArchiveSink::new(&archive, "pw")
            .write(&selection, &mut NoopProgress)
            .unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        let mut in_order = Vec::new();
        for i in 0..zip.len() {
            in_order.push(zip.by_index_raw(i).unwrap().name().to_string());
        }
        assert_eq!(in_order, vec!["z.key", "a.key", "m/m.key"]);
    }

    #[test]
    fn test_archive_creates_parent_and_truncates() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let archive = out.path().join("nested/dir/found.zip");

        let first = selection_of(src.path(), &[("one.key", b"1"), ("two.key", b"2")]);
        EncryptedArchiveSink::new(&archive, "pw")
            .write(&first, &mut NoopProgress)
            .unwrap();

        let second = Selection::from_paths(src.path(), &[src.path().join("one.key")]).unwrap();
        EncryptedArchiveSink::new(&archive, "pw")
            .write(&second, &mut NoopProgress)
            .unwrap();

        let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);
    }

    #[test]
    fn test_archive_empty_selection_is_valid() {
        let out = TempDir::new().unwrap();
        let archive = out.path().join("empty.zip");

        let report = EncryptedArchiveSink::new(&archive, "pw")
            .write(&Selection::default(), &mut NoopProgress)
            .unwrap();

        assert_eq!(report.files_written, 0);
        let zip = zip::ZipArchive::new(File::open(&archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 0);
    }

    #[test]
    fn test_archive_rejects_empty_password_without_creating_file() {
        let out = TempDir::new().unwrap();
        let archive = out.path().join("never.zip");

        let err = EncryptedArchiveSink::new(&archive, "")
            .write(&Selection::default(), &mut NoopProgress)
            .unwrap_err();

        assert!(err.is_configuration());
        assert!(!archive.exists());
    }

    #[test]
    fn test_archive_rejects_bad_compression_level() {
        let out = TempDir::new().unwrap();
        let err = EncryptedArchiveSink::new(out.path().join("x.zip"), "pw")
            .with_compression_level(12)
            .write(&Selection::default(), &mut NoopProgress)
            .unwrap_err();
        assert!(matches!(err, KeysweepError::InvalidCompressionLevel { level: 12 }));
    }

    #[test]
    fn test_debug_hides_password() {
        let sink = EncryptedArchiveSink::new("x.zip", "hunter2");
        assert!(!format!("{sink:?}").contains("hunter2"));
    }
}
