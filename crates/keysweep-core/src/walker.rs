//! Directory tree walking with ignore/accept selection.
//!
//! The walk is depth-first in filesystem enumeration order. Each entry is
//! checked against the ignore list first; an ignored directory is never
//! entered. Files that survive are selected only if they match the accept list.
//! Directories always get descended into unless ignored.

use crate::KeysweepError;
use crate::Result;
use crate::config::ScanConfig;
use crate::patterns::Candidate;
use crate::patterns::Decision;
use crate::patterns::SelectionPolicy;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::info_span;
use tracing::trace;
use walkdir::WalkDir;

/// One entry from a directory listing.
///
/// Built while walking and dropped once the entry has been classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Bare file name.
    pub name: String,
    /// Full path (scan root joined with the relative path).
    pub path: PathBuf,
    /// Size in bytes (0 for directories).
    pub size: u64,
    /// Whether the entry is a directory.
    pub is_dir: bool,
}

impl FileEntry {
    fn from_dir_entry(entry: &walkdir::DirEntry) -> Result<Self> {
        let is_dir = entry.file_type().is_dir();
        let size = if is_dir {
            0
        } else {
            entry
                .metadata()
                .map_err(|e| walk_error(e, entry.path()))?
                .len()
        };

        Ok(Self {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
            size,
            is_dir,
        })
    }
}

/// A regular file chosen by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative: PathBuf,
    /// Size in bytes at the time of the walk.
    pub size: u64,
}

/// Ordered set of files selected under one scan root.
///
/// This is the only thing handed from the walker to an output sink. Every
/// file lies strictly under [`Selection::root`] and is a regular file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    root: PathBuf,
    files: Vec<SelectedFile>,
}

impl Selection {
    /// Builds a selection from explicit paths under `root`.
    ///
    /// Sizes are read from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is not under `root`, is the root itself, or
    /// cannot be inspected.
    pub fn from_paths<P: AsRef<Path>>(root: impl Into<PathBuf>, paths: &[P]) -> Result<Self> {
        let root = root.into();
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            let path = path.as_ref();
            let relative = path
                .strip_prefix(&root)
                .ok()
                .filter(|r| !r.as_os_str().is_empty())
                .ok_or_else(|| {
                    KeysweepError::config(format!(
                        "{} is not under scan root {}",
                        path.display(),
                        root.display()
                    ))
                })?
                .to_path_buf();
            let size = std::fs::metadata(path)
                .map_err(|e| KeysweepError::Walk {
                    path: path.to_path_buf(),
                    source: e,
                })?
                .len();

            files.push(SelectedFile {
                path: path.to_path_buf(),
                relative,
                size,
            });
        }

        Ok(Self { root, files })
    }

    /// The directory the selection was made under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Selected files in walk order.
    #[must_use]
    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    /// Number of selected files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns `true` if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Sum of selected file sizes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Walks a directory tree and selects files according to a
/// [`SelectionPolicy`].
///
/// # Examples
///
/// ```no_run
/// use keysweep_core::PatternSet;
/// use keysweep_core::walker::TreeWalker;
/// use std::path::Path;
///
/// let policy = PatternSet::default().compile()?;
/// let selection = TreeWalker::new(Path::new("./project"), &policy).walk()?;
/// for file in selection.files() {
///     println!("{}", file.relative.display());
/// }
/// # Ok::<(), keysweep_core::KeysweepError>(())
/// ```
pub struct TreeWalker<'a> {
    root: &'a Path,
    policy: &'a SelectionPolicy,
    follow_symlinks: bool,
    excluded: Option<PathBuf>,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker for `root` that does not follow symlinks.
    #[must_use]
    pub fn new(root: &'a Path, policy: &'a SelectionPolicy) -> Self {
        Self {
            root,
            policy,
            follow_symlinks: false,
            excluded: None,
        }
    }

    /// Sets whether symlinks are followed.
    #[must_use]
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Never selects `path`, and never descends into it if it is a
    /// directory.
    ///
    /// Used to keep a run's own output out of its selection. A path that does
    /// not exist yet or lies outside the root excludes nothing.
    #[must_use]
    pub fn exclude(mut self, path: &Path) -> Self {
        self.excluded = relative_to_root(self.root, path);
        self
    }

    /// Runs the walk.
    ///
    /// # Errors
    ///
    /// Returns [`KeysweepError::Walk`] for the first directory that cannot be
    /// listed or entry that cannot be inspected. No partial result is
    /// returned.
    pub fn walk(&self) -> Result<Selection> {
        let _span = info_span!("walk", root = %self.root.display()).entered();

        let mut selection = Selection {
            root: self.root.to_path_buf(),
            files: Vec::new(),
        };

        let mut entries = WalkDir::new(self.root)
            .min_depth(1)
            .follow_links(self.follow_symlinks)
            .into_iter();

        while let Some(next) = entries.next() {
            let dir_entry = next.map_err(|e| {
                let path = e.path().unwrap_or(self.root).to_path_buf();
                walk_error(e, &path)
            })?;

            let file_type = dir_entry.file_type();
            if file_type.is_symlink() {
                debug!(path = %dir_entry.path().display(), "skipping symlink");
                continue;
            }
            if !file_type.is_dir() && !file_type.is_file() {
                debug!(path = %dir_entry.path().display(), "skipping special file");
                continue;
            }

            let entry = FileEntry::from_dir_entry(&dir_entry)?;
            let Ok(relative) = entry.path.strip_prefix(self.root) else {
                continue;
            };
            if self.excluded.as_deref() == Some(relative) {
                debug!(path = %entry.path.display(), "skipping output target");
                if entry.is_dir {
                    entries.skip_current_dir();
                }
                continue;
            }

            let candidate = Candidate::new(relative, entry.is_dir);

            match self.policy.decide(&candidate, entry.is_dir) {
                Decision::Ignored(pattern) => {
                    if entry.is_dir {
                        debug!(path = %candidate.path, pattern, "pruning ignored directory");
                        entries.skip_current_dir();
                    } else {
                        trace!(path = %candidate.path, pattern, "ignored");
                    }
                }
                Decision::Selected(pattern) => {
                    trace!(path = %candidate.path, pattern, size = entry.size, "selected");
                    selection.files.push(SelectedFile {
                        relative: relative.to_path_buf(),
                        path: entry.path,
                        size: entry.size,
                    });
                }
                Decision::Descend | Decision::Rejected => {}
            }
        }

        debug!(files = selection.len(), "walk complete");
        Ok(selection)
    }
}

/// Validates `config`, compiles its patterns and walks its root.
///
/// # Examples
///
/// ```no_run
/// use keysweep_core::ScanConfig;
/// use keysweep_core::walker::walk;
///
/// let selection = walk(&ScanConfig::new("."))?;
/// println!("Found {} files", selection.len());
/// # Ok::<(), keysweep_core::KeysweepError>(())
/// ```
pub fn walk(config: &ScanConfig) -> Result<Selection> {
    walk_config(config, None)
}

/// Like [`walk`], leaving `excluded` and everything below it out of the
/// selection.
///
/// # Errors
///
/// Same as [`walk`].
pub fn walk_excluding(config: &ScanConfig, excluded: &Path) -> Result<Selection> {
    walk_config(config, Some(excluded))
}

fn walk_config(config: &ScanConfig, excluded: Option<&Path>) -> Result<Selection> {
    config.validate()?;
    let policy = config.patterns.compile()?;
    let mut walker = TreeWalker::new(&config.root, &policy).follow_symlinks(config.follow_symlinks);
    if let Some(path) = excluded {
        walker = walker.exclude(path);
    }
    walker.walk()
}

/// Resolves `path` to a non-empty path relative to `root`, following
/// symlinks on both sides.
fn relative_to_root(root: &Path, path: &Path) -> Option<PathBuf> {
    let root = std::fs::canonicalize(root).ok()?;
    let path = std::fs::canonicalize(path).ok()?;
    path.strip_prefix(&root)
        .ok()
        .filter(|r| !r.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

fn walk_error(err: walkdir::Error, path: &Path) -> KeysweepError {
    KeysweepError::Walk {
        path: path.to_path_buf(),
        source: err.into(),
    }
}
