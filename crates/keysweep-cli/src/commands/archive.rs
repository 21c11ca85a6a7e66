//! Archive command implementation.

use crate::cli::ArchiveArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use keysweep_core::SinkConfig;

pub fn execute(
    args: &ArchiveArgs,
    formatter: &dyn OutputFormatter,
    show_progress: bool,
) -> Result<()> {
    let scan = args.selection.scan_config();
    let output = SinkConfig::archive(&args.output, args.password.as_str())
        .with_compression_level(args.compression_level);

    let report = super::run_sweep(&scan, &output, "Encrypting", show_progress)?;

    if report.files_selected == 0 {
        formatter.format_warning(&format!(
            "No files matched the accept patterns; {} has no entries",
            report.output.display()
        ));
    }
    formatter.format_sweep_result(&report)
}
