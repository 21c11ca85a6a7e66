//! Glob pattern matching for file selection.
//!
//! Patterns use shell-glob syntax with a recursive `**` segment. A candidate
//! is tested twice per pattern set: once by its root-relative path and once by
//! its bare name. Directories carry a trailing `/` in both forms so that
//! patterns such as `**/node_modules/**` match the directory itself.
//!
//! Patterns are compiled once into a [`GlobSet`] and reused for every
//! candidate of a run.

use crate::KeysweepError;
use crate::Result;
use globset::GlobBuilder;
use globset::GlobSet;
use globset::GlobSetBuilder;
use std::path::Path;

/// Accept patterns used when no override is given.
///
/// Biased toward files that commonly hold credentials or key material.
pub const DEFAULT_ACCEPT_PATTERNS: &[&str] = &[
    "**/.env*",
    "**/config.yaml",
    "**/config.json",
    "**/secrets.*",
    "**/firebase-*.json",
    "**/*.pem",
    "**/*.key",
    "**/id_rsa*",
    "**/credentials.json",
];

/// Ignore patterns used when no override is given.
///
/// Skips version control metadata, dependency and vendored trees, editor
/// state, build output and logs.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    "**/.git/**",
    "**/node_modules/**",
    "**/vendor/**",
    "**/.idea/**",
    "**/.vscode/**",
    "**/dist/**",
    "**/build/**",
    "**/*.log",
];

/// An ordered list of glob patterns compiled into a single matcher.
///
/// # Examples
///
/// ```
/// use keysweep_core::patterns::PatternMatcher;
///
/// let matcher = PatternMatcher::new(["**/*.pem", "**/id_rsa*"]).unwrap();
/// assert!(matcher.is_match("certs/server.pem", "server.pem"));
/// assert!(matcher.is_match("home/.ssh/id_rsa", "id_rsa"));
/// assert!(!matcher.is_match("src/main.rs", "main.rs"));
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PatternMatcher {
    /// Compiles the given patterns.
    ///
    /// Matching is case-sensitive and `*` may span `/`. A pattern that fails
    /// to parse is a configuration error; it is never skipped.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        let mut builder = GlobSetBuilder::new();

        for pattern in &patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(false)
                .case_insensitive(false)
                .build()
                .map_err(|e| KeysweepError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: e.kind().to_string(),
                })?;
            builder.add(glob);
        }

        let set = builder.build().map_err(|e| KeysweepError::InvalidPattern {
            pattern: e.glob().unwrap_or_default().to_string(),
            reason: e.kind().to_string(),
        })?;

        Ok(Self { patterns, set })
    }

    /// Returns `true` if any pattern matches either `path` or `name`.
    #[must_use]
    pub fn is_match(&self, path: &str, name: &str) -> bool {
        self.set.is_match(path) || self.set.is_match(name)
    }

    /// Returns the first pattern, in list order, that matches `path` or `name`.
    ///
    /// The matching pattern is only resolved on a hit; a miss costs the same
    /// as [`PatternMatcher::is_match`].
    #[must_use]
    pub fn first_match(&self, path: &str, name: &str) -> Option<&str> {
        if !self.is_match(path, name) {
            return None;
        }

        let by_path = self.set.matches(path).into_iter().min();
        let by_name = self.set.matches(name).into_iter().min();
        let index = match (by_path, by_name) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => return None,
        };
        self.patterns.get(index).map(String::as_str)
    }

    /// Returns the patterns in the order they were supplied.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns `true` if the matcher holds no patterns and so matches nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Tests a single path/name pair against `patterns` without keeping the
/// compiled form around.
///
/// Prefer building a [`PatternMatcher`] once when testing many candidates.
///
/// # Examples
///
/// ```
/// use keysweep_core::patterns::matches;
///
/// let patterns = ["**/node_modules/**"];
/// assert!(matches("web/node_modules/", "node_modules/", &patterns).unwrap());
/// assert!(!matches("web/src/", "src/", &patterns).unwrap());
/// ```
pub fn matches<S: AsRef<str>>(candidate_path: &str, candidate_name: &str, patterns: &[S]) -> Result<bool> {
    let matcher = PatternMatcher::new(patterns.iter().map(|p| p.as_ref().to_string()))?;
    Ok(matcher.is_match(candidate_path, candidate_name))
}

/// The two string forms a directory entry is matched by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Root-relative path, `/`-separated, with a trailing `/` for directories.
    pub path: String,
    /// Bare file name, with a trailing `/` for directories.
    pub name: String,
}

impl Candidate {
    /// Builds the match forms for an entry at `relative` (relative to the scan
    /// root).
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep_core::patterns::Candidate;
    /// use std::path::Path;
    ///
    /// let dir = Candidate::new(Path::new("web/node_modules"), true);
    /// assert_eq!(dir.path, "web/node_modules/");
    /// assert_eq!(dir.name, "node_modules/");
    ///
    /// let file = Candidate::new(Path::new("web/.env"), false);
    /// assert_eq!(file.path, "web/.env");
    /// assert_eq!(file.name, ".env");
    /// ```
    #[must_use]
    pub fn new(relative: &Path, is_dir: bool) -> Self {
        let mut path = to_slash(relative);
        let mut name = relative
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if is_dir {
            path.push('/');
            name.push('/');
        }

        Self { path, name }
    }
}

/// Converts a path to a `/`-separated string.
pub(crate) fn to_slash(path: &Path) -> String {
    let s = path.to_string_lossy();

    #[cfg(windows)]
    let s = s.replace('\\', "/");

    #[cfg(not(windows))]
    let s = s.into_owned();

    s
}

/// What the selection policy decided for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'a> {
    /// Matched an ignore pattern; skip it and never descend.
    Ignored(&'a str),
    /// A file that matched an accept pattern.
    Selected(&'a str),
    /// A directory that was not ignored; descend into it.
    Descend,
    /// A file that matched no accept pattern.
    Rejected,
}

/// Compiled ignore and accept lists with their precedence rules.
///
/// Ignore is evaluated strictly first and is final. Directories bypass the
/// accept list: they are descended into unless ignored.
#[derive(Debug, Clone)]
pub struct SelectionPolicy {
    ignore: PatternMatcher,
    accept: PatternMatcher,
}

impl SelectionPolicy {
    /// Compiles both lists.
    pub fn new<S: AsRef<str>>(ignore: &[S], accept: &[S]) -> Result<Self> {
        Ok(Self {
            ignore: PatternMatcher::new(ignore.iter().map(|p| p.as_ref().to_string()))?,
            accept: PatternMatcher::new(accept.iter().map(|p| p.as_ref().to_string()))?,
        })
    }

    /// Decides what to do with one candidate.
    ///
    /// # Examples
    ///
    /// ```
    /// use keysweep_core::patterns::Candidate;
    /// use keysweep_core::patterns::Decision;
    /// use keysweep_core::patterns::SelectionPolicy;
    /// use std::path::Path;
    ///
    /// let policy = SelectionPolicy::new(&["**/node_modules/**"], &["**/*.key"]).unwrap();
    ///
    /// let dir = Candidate::new(Path::new("a/node_modules"), true);
    /// assert_eq!(policy.decide(&dir, true), Decision::Ignored("**/node_modules/**"));
    ///
    /// let key = Candidate::new(Path::new("a/server.key"), false);
    /// assert_eq!(policy.decide(&key, false), Decision::Selected("**/*.key"));
    /// ```
    #[must_use]
    pub fn decide(&self, candidate: &Candidate, is_dir: bool) -> Decision<'_> {
        if let Some(pattern) = self.ignore.first_match(&candidate.path, &candidate.name) {
            return Decision::Ignored(pattern);
        }

        if is_dir {
            return Decision::Descend;
        }

        self.accept
            .first_match(&candidate.path, &candidate.name)
            .map_or(Decision::Rejected, Decision::Selected)
    }

    /// Returns the compiled ignore list.
    #[must_use]
    pub fn ignore(&self) -> &PatternMatcher {
        &self.ignore
    }

    /// Returns the compiled accept list.
    #[must_use]
    pub fn accept(&self) -> &PatternMatcher {
        &self.accept
    }
}
