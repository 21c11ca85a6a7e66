//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use keysweep_core::Selection;
use keysweep_core::SweepReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct ScanFile {
    path: String,
    size: u64,
}

#[derive(Debug, Serialize)]
struct ScanOutput {
    root: String,
    files_found: usize,
    total_bytes: u64,
    files: Vec<ScanFile>,
}

impl ScanOutput {
    fn from_selection(selection: &Selection) -> Self {
        Self {
            root: selection.root().display().to_string(),
            files_found: selection.len(),
            total_bytes: selection.total_bytes(),
            files: selection
                .files()
                .iter()
                .map(|f| ScanFile {
                    path: f.relative.to_string_lossy().replace('\\', "/"),
                    size: f.size,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SweepOutput {
    mode: &'static str,
    output: String,
    files_found: usize,
    files_written: usize,
    bytes_written: u64,
    duration_ms: u128,
}

impl From<&SweepReport> for SweepOutput {
    fn from(report: &SweepReport) -> Self {
        Self {
            mode: report.mode.as_str(),
            output: report.output.display().to_string(),
            files_found: report.files_selected,
            files_written: report.files_written,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_scan_result(&self, selection: &Selection) -> Result<()> {
        Self::output(&JsonOutput::success(
            "scan",
            ScanOutput::from_selection(selection),
        ))
    }

    fn format_sweep_result(&self, report: &SweepReport) -> Result<()> {
        Self::output(&JsonOutput::success(
            report.mode.as_str(),
            SweepOutput::from(report),
        ))
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::warning(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
