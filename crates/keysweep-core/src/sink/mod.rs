//! Output sinks that materialize a [`Selection`].
//!
//! Two sinks exist: [`MirrorCopySink`] copies files under an output directory
//! and [`EncryptedArchiveSink`] writes one AES-256 encrypted ZIP. Both consume
//! the same selection, so traversal and matching happen exactly once.

pub mod archive;
pub mod mirror;

pub use archive::EncryptedArchiveSink;
pub use mirror::MirrorCopySink;

use crate::OutputMode;
use crate::ProgressCallback;
use crate::Result;
use crate::Selection;
use crate::WriteReport;
use crate::config::SinkConfig;
use std::path::Path;

/// A destination for selected files.
pub trait OutputSink {
    /// Writes every file in `selection`, in order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; the run is aborted and output
    /// already written is left in place.
    fn write(&self, selection: &Selection, progress: &mut dyn ProgressCallback)
    -> Result<WriteReport>;

    /// Which output strategy this sink implements.
    fn mode(&self) -> OutputMode;

    /// Output directory or archive path.
    fn target(&self) -> &Path;
}

/// Builds the sink described by `config`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid (see
/// [`SinkConfig::validate`]).
pub fn build(config: &SinkConfig) -> Result<Box<dyn OutputSink>> {
    config.validate()?;
    Ok(match config {
        SinkConfig::Mirror {
            output_dir,
            overwrite,
        } => Box::new(MirrorCopySink::new(output_dir, *overwrite)),
        SinkConfig::Archive {
            path,
            password,
            compression_level,
        } => Box::new(
            EncryptedArchiveSink::new(path, password).with_compression_level(*compression_level),
        ),
    })
}
