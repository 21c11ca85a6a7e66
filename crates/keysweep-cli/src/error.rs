//! Error conversion utilities for CLI.
//!
//! Converts keysweep-core's typed errors (thiserror) into user-facing
//! errors (anyhow) with a `HINT:` line where the user can act on them.

use anyhow::anyhow;
use keysweep_core::KeysweepError;

/// Converts a `KeysweepError` into an anyhow error with guidance.
pub fn convert_sweep_error(err: KeysweepError) -> anyhow::Error {
    match err {
        KeysweepError::SourceNotFound { path } => anyhow!(
            "Scan target not found: {}\n\
             HINT: Pass an existing directory with --target.",
            path.display()
        ),
        KeysweepError::NotADirectory { path } => anyhow!(
            "Scan target is not a directory: {}\n\
             HINT: --target expects a directory, not a file.",
            path.display()
        ),
        KeysweepError::InvalidPattern { pattern, reason } => anyhow!(
            "Invalid glob pattern '{pattern}': {reason}\n\
             HINT: Check --ignore/--accept. Lists are comma-separated globs such as '**/*.pem,**/.env*'."
        ),
        KeysweepError::AlreadyExists { path } => anyhow!(
            "Refusing to overwrite existing file: {}\n\
             HINT: Nothing was copied. Use --force to overwrite, or choose an empty --output directory.",
            path.display()
        ),
        KeysweepError::InvalidConfig { reason } if reason.contains("password") => anyhow!(
            "Archive password is empty\n\
             HINT: Pass --password or set KEYSWEEP_PASSWORD."
        ),
        KeysweepError::Walk { path, source } => anyhow!(
            "Cannot read {} while scanning: {source}\n\
             HINT: Check permissions, or add the directory to --ignore.",
            path.display()
        ),
        KeysweepError::Encryption { path, reason } => anyhow!(
            "Failed to encrypt '{}': {reason}",
            path.display()
        ),
        other => anyhow::Error::from(other),
    }
}

/// Maps a core result into an anyhow result with guidance attached.
pub fn add_sweep_context<T>(result: Result<T, KeysweepError>) -> anyhow::Result<T> {
    result.map_err(convert_sweep_error)
}
