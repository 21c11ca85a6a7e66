//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use keysweep_core::PatternSet;
use keysweep_core::ScanConfig;
use keysweep_core::config::DEFAULT_COMPRESSION_LEVEL;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keysweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List files the selection policy picks, without writing anything
    Scan(ScanArgs),
    /// Copy selected files into a directory, keeping their relative paths
    Mirror(MirrorArgs),
    /// Pack selected files into an AES-256 encrypted ZIP archive
    Archive(ArchiveArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Operation name used in JSON output.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Scan(_) => "scan",
            Self::Mirror(_) => "mirror",
            Self::Archive(_) => "archive",
            Self::Completion { .. } => "completion",
        }
    }
}

/// Selection flags shared by every sweeping subcommand.
#[derive(clap::Args)]
pub struct SelectionArgs {
    /// Directory to scan
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub target: PathBuf,

    /// Comma-separated ignore globs, replacing the defaults
    #[arg(short, long, value_name = "LIST")]
    pub ignore: Option<String>,

    /// Comma-separated accept globs, replacing the defaults
    #[arg(short, long, value_name = "LIST")]
    pub accept: Option<String>,

    /// Follow symbolic links while walking
    #[arg(long)]
    pub follow_symlinks: bool,
}

impl SelectionArgs {
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(&self.target)
            .with_patterns(PatternSet::from_overrides(
                self.ignore.as_deref(),
                self.accept.as_deref(),
            ))
            .with_follow_symlinks(self.follow_symlinks)
    }
}

#[derive(clap::Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

#[derive(clap::Args)]
pub struct MirrorArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Directory receiving the copies
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Overwrite files that already exist in the output directory
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Archive file to create (truncated if it exists)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Encryption password
    #[arg(short, long, env = "KEYSWEEP_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Deflate compression level (1-9)
    #[arg(
        short = 'l',
        long,
        default_value_t = DEFAULT_COMPRESSION_LEVEL,
        value_parser = clap::value_parser!(u8).range(1..=9)
    )]
    pub compression_level: u8,
}
