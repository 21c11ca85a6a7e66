//! Configuration for scan and output operations.

use crate::KeysweepError;
use crate::Result;
use crate::patterns::DEFAULT_ACCEPT_PATTERNS;
use crate::patterns::DEFAULT_IGNORE_PATTERNS;
use crate::patterns::SelectionPolicy;
use std::path::PathBuf;

/// Ignore and accept glob lists for one run.
///
/// Order within each list does not affect which files are selected; it only
/// decides which pattern is named when a match is logged.
///
/// # Examples
///
/// ```
/// use keysweep_core::PatternSet;
///
/// let defaults = PatternSet::default();
/// assert!(defaults.accept.contains(&"**/*.pem".to_string()));
///
/// let custom = PatternSet::from_overrides(Some("**/target/**"), Some("**/*.p12,**/*.pfx"));
/// assert_eq!(custom.ignore, vec!["**/target/**"]);
/// assert_eq!(custom.accept, vec!["**/*.p12", "**/*.pfx"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSet {
    /// Patterns that exclude files and prune directories.
    pub ignore: Vec<String>,
    /// Patterns that select files.
    pub accept: Vec<String>,
}

impl Default for PatternSet {
    /// Uses [`DEFAULT_IGNORE_PATTERNS`] and [`DEFAULT_ACCEPT_PATTERNS`].
    fn default() -> Self {
        Self {
            ignore: DEFAULT_IGNORE_PATTERNS.iter().map(ToString::to_string).collect(),
            accept: DEFAULT_ACCEPT_PATTERNS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PatternSet {
    /// Builds a pattern set from optional comma-separated overrides.
    ///
    /// A list that is `None` or blank falls back to its default. Empty items
    /// are dropped and surrounding whitespace is trimmed.
    #[must_use]
    pub fn from_overrides(ignore: Option<&str>, accept: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            ignore: override_or(ignore, defaults.ignore),
            accept: override_or(accept, defaults.accept),
        }
    }

    /// Compiles both lists into a [`SelectionPolicy`].
    pub fn compile(&self) -> Result<SelectionPolicy> {
        SelectionPolicy::new(&self.ignore, &self.accept)
    }
}

fn override_or(raw: Option<&str>, default: Vec<String>) -> Vec<String> {
    match raw {
        Some(list) if !list.trim().is_empty() => split_pattern_list(list),
        _ => default,
    }
}

/// Splits a comma-separated pattern list, dropping empty items.
///
/// # Examples
///
/// ```
/// use keysweep_core::config::split_pattern_list;
///
/// assert_eq!(split_pattern_list("*.pem, ,*.key,"), vec!["*.pem", "*.key"]);
/// assert!(split_pattern_list(",,").is_empty());
/// ```
#[must_use]
pub fn split_pattern_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Configuration for the selection pass.
///
/// # Examples
///
/// ```
/// use keysweep_core::ScanConfig;
///
/// let config = ScanConfig::new("./project").with_follow_symlinks(true);
/// assert!(config.follow_symlinks);
/// ```
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to scan.
    ///
    /// Default: `.`.
    pub root: PathBuf,

    /// Ignore and accept patterns.
    ///
    /// Default: [`PatternSet::default`].
    pub patterns: PatternSet,

    /// Follow symbolic links during traversal.
    ///
    /// Default: `false` (symlinks are skipped).
    ///
    /// Following links may pull in files from outside the scan root; loops
    /// are reported as walk errors.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            patterns: PatternSet::default(),
            follow_symlinks: false,
        }
    }
}

impl ScanConfig {
    /// Creates a configuration scanning `root` with default patterns.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Sets the pattern lists.
    #[must_use]
    pub fn with_patterns(mut self, patterns: PatternSet) -> Self {
        self.patterns = patterns;
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Checks that the root exists and is a directory.
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(KeysweepError::SourceNotFound {
                path: self.root.clone(),
            });
        }
        if !self.root.is_dir() {
            return Err(KeysweepError::NotADirectory {
                path: self.root.clone(),
            });
        }
        Ok(())
    }
}

/// Default deflate level for archive entries.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Where and how selected files are written.
#[derive(Clone)]
pub enum SinkConfig {
    /// Copy files under `output_dir`, keeping their root-relative layout.
    Mirror {
        /// Destination directory (created if missing).
        output_dir: PathBuf,
        /// Replace existing destination files instead of failing.
        overwrite: bool,
    },
    /// Write one AES-256 encrypted ZIP archive.
    Archive {
        /// Archive file (created or truncated).
        path: PathBuf,
        /// Password every entry is encrypted with.
        password: String,
        /// Deflate level 1-9.
        compression_level: u8,
    },
}

impl std::fmt::Debug for SinkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mirror {
                output_dir,
                overwrite,
            } => f
                .debug_struct("Mirror")
                .field("output_dir", output_dir)
                .field("overwrite", overwrite)
                .finish(),
            Self::Archive {
                path,
                compression_level,
                ..
            } => f
                .debug_struct("Archive")
                .field("path", path)
                .field("password", &"<redacted>")
                .field("compression_level", compression_level)
                .finish(),
        }
    }
}

impl SinkConfig {
    /// Mirror mode without overwriting.
    #[must_use]
    pub fn mirror(output_dir: impl Into<PathBuf>) -> Self {
        Self::Mirror {
            output_dir: output_dir.into(),
            overwrite: false,
        }
    }

    /// Archive mode with the default compression level.
    #[must_use]
    pub fn archive(path: impl Into<PathBuf>, password: impl Into<String>) -> Self {
        Self::Archive {
            path: path.into(),
            password: password.into(),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// Sets overwrite for mirror mode; no effect on archives, which are
    /// always truncated.
    #[must_use]
    pub fn with_overwrite(mut self, value: bool) -> Self {
        if let Self::Mirror { overwrite, .. } = &mut self {
            *overwrite = value;
        }
        self
    }

    /// Sets the compression level for archive mode.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        if let Self::Archive {
            compression_level, ..
        } = &mut self
        {
            *compression_level = level;
        }
        self
    }

    /// Returns the output location.
    #[must_use]
    pub fn target(&self) -> &std::path::Path {
        match self {
            Self::Mirror { output_dir, .. } => output_dir,
            Self::Archive { path, .. } => path,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output path is empty
    /// - Archive mode has an empty password
    /// - Compression level is not in range 1-9
    pub fn validate(&self) -> Result<()> {
        if self.target().as_os_str().is_empty() {
            return Err(KeysweepError::config("output path must be provided"));
        }

        if let Self::Archive {
            password,
            compression_level,
            ..
        } = self
        {
            if password.is_empty() {
                return Err(KeysweepError::config(
                    "encryption password must be provided",
                ));
            }
            if !(1..=9).contains(compression_level) {
                return Err(KeysweepError::InvalidCompressionLevel {
                    level: *compression_level,
                });
            }
        }

        Ok(())
    }
}
