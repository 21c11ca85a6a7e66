//! Error types for sweep operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `KeysweepError`.
pub type Result<T> = std::result::Result<T, KeysweepError>;

/// Broad category of a [`KeysweepError`].
///
/// Every error aborts the run; the kind only tells the caller what went wrong
/// so it can pick a message or exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The run was misconfigured (bad pattern, missing target or password).
    Configuration,
    /// A filesystem or archive I/O operation failed.
    Io,
    /// A mirror destination already exists and overwriting is disabled.
    AlreadyExists,
    /// The archive cipher rejected the password or failed to encrypt.
    Encryption,
}

/// Errors that can occur while selecting or writing sensitive files.
#[derive(Error, Debug)]
pub enum KeysweepError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory could not be listed or an entry could not be inspected
    /// during traversal.
    #[error("cannot read {}: {source}", path.display())]
    Walk {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A selected file could not be opened for reading.
    #[error("cannot open {}: {source}", path.display())]
    ReadFile {
        /// Source file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An output file or directory could not be created.
    #[error("cannot create {}: {source}", path.display())]
    WriteFile {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Streaming a file's contents into the output failed.
    #[error("failed to copy {}: {source}", path.display())]
    Copy {
        /// Source file being copied.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Scan root does not exist.
    #[error("scan root not found: {}", path.display())]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Scan root exists but is not a directory.
    #[error("scan root is not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// A glob pattern failed to compile.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as supplied.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// Configuration is incomplete or inconsistent.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// What is wrong.
        reason: String,
    },

    /// Compression level out of range.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Mirror destination already exists and overwrite is disabled.
    #[error("file already exists: {}", path.display())]
    AlreadyExists {
        /// The colliding destination.
        path: PathBuf,
    },

    /// The archive writer failed to encrypt an entry.
    #[error("encryption failed for {}: {reason}", path.display())]
    Encryption {
        /// Root-relative path of the entry being encrypted.
        path: PathBuf,
        /// Message from the archive writer.
        reason: String,
    },

    /// The archive container could not be written or finalized.
    #[error("archive error: {0}")]
    Archive(String),
}

impl KeysweepError {
    /// Returns the category this error belongs to.
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep_core::ErrorKind;
    /// use keysweep_core::KeysweepError;
    /// use std::path::PathBuf;
    ///
    /// let err = KeysweepError::AlreadyExists {
    ///     path: PathBuf::from("out/.env"),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    ///
    /// let err = KeysweepError::InvalidPattern {
    ///     pattern: "[".into(),
    ///     reason: "unclosed character class".into(),
    /// };
    /// assert_eq!(err.kind(), ErrorKind::Configuration);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_)
            | Self::Walk { .. }
            | Self::ReadFile { .. }
            | Self::WriteFile { .. }
            | Self::Copy { .. }
            | Self::Archive(_) => ErrorKind::Io,
            Self::SourceNotFound { .. }
            | Self::NotADirectory { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidConfig { .. }
            | Self::InvalidCompressionLevel { .. } => ErrorKind::Configuration,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Encryption { .. } => ErrorKind::Encryption,
        }
    }

    /// Returns `true` if this error stems from configuration rather than from
    /// the filesystem.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Maps an error from the zip writer, keeping I/O failures as I/O.
    pub(crate) fn from_zip(err: zip::result::ZipError, context: &str) -> Self {
        match err {
            zip::result::ZipError::Io(io) => Self::Io(io),
            other => Self::Archive(format!("{context}: {other}")),
        }
    }
}
