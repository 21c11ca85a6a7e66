//! Selection engine and output sinks for sweeping sensitive files.
//!
//! `keysweep-core` walks a directory tree, selects files matching accept/ignore
//! glob policies (tuned by default for credentials and key material), and
//! writes the selection either as plain copies under an output directory or as
//! a single AES-256 encrypted ZIP archive.
//!
//! # Examples
//!
//! ```no_run
//! use keysweep_core::ScanConfig;
//! use keysweep_core::SinkConfig;
//! use keysweep_core::sweep;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scan = ScanConfig::new("./project");
//! let output = SinkConfig::archive("secrets.zip", "correct horse battery staple");
//! let report = sweep(&scan, &output)?;
//! println!("Found {} files", report.files_selected);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod copy;
pub mod driver;
pub mod error;
pub mod patterns;
pub mod report;
pub mod sink;
pub mod walker;

// Re-export main API types
pub use config::PatternSet;
pub use config::ScanConfig;
pub use config::SinkConfig;
pub use driver::select_files;
pub use driver::sweep;
pub use driver::sweep_with_progress;
pub use error::ErrorKind;
pub use error::KeysweepError;
pub use error::Result;
pub use report::NoopProgress;
pub use report::OutputMode;
pub use report::ProgressCallback;
pub use report::SweepReport;
pub use report::WriteReport;
pub use walker::FileEntry;
pub use walker::SelectedFile;
pub use walker::Selection;
