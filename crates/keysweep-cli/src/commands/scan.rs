//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::error::add_sweep_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use keysweep_core::select_files;

pub fn execute(args: &ScanArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = args.selection.scan_config();
    let selection = add_sweep_context(select_files(&config))?;

    formatter.format_scan_result(&selection)
}
