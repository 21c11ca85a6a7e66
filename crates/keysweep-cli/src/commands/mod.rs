//! Subcommand implementations.

pub mod archive;
pub mod completion;
pub mod mirror;
pub mod scan;

use crate::error::add_sweep_context;
use crate::progress::CliProgress;
use anyhow::Result;
use keysweep_core::ScanConfig;
use keysweep_core::SinkConfig;
use keysweep_core::SweepReport;
use keysweep_core::sweep;
use keysweep_core::sweep_with_progress;

/// Runs a full sweep, drawing a progress bar when `show_progress` is set.
fn run_sweep(
    scan: &ScanConfig,
    output: &SinkConfig,
    action: &str,
    show_progress: bool,
) -> Result<SweepReport> {
    let result = if show_progress {
        let mut progress = CliProgress::new(action);
        sweep_with_progress(scan, output, &mut progress)
    } else {
        sweep(scan, output)
    };
    add_sweep_context(result)
}
