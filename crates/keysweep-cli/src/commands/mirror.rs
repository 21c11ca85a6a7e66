//! Mirror command implementation.

use crate::cli::MirrorArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use keysweep_core::SinkConfig;

pub fn execute(
    args: &MirrorArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let scan = args.selection.scan_config();
    let output = SinkConfig::mirror(&args.output).with_overwrite(args.force);

    let report = super::run_sweep(&scan, &output, "Copying", show_progress)?;

    if report.files_selected == 0 {
        formatter.format_warning("No files matched the accept patterns; nothing was copied");
    }
    formatter.format_sweep_result(&report)
}
