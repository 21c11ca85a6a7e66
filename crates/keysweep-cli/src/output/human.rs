//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use keysweep_core::OutputMode;
use keysweep_core::Selection;
use keysweep_core::SweepReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::with_capacity(s.len() + s.len() / 3);

        for (i, c) in s.chars().enumerate() {
            if i > 0 && (s.len() - i) % 3 == 0 {
                result.push(',');
            }
            result.push(c);
        }

        result
    }

    fn write_line(&self, line: &str) {
        let _ = self.term.write_line(line);
    }

    fn headline(&self, text: &str) {
        if self.use_colors {
            self.write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            self.write_line(text);
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_scan_result(&self, selection: &Selection) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for file in selection.files() {
            if self.verbose {
                self.write_line(&format!(
                    "{:>10}  {}",
                    humanize_bytes(file.size),
                    file.relative.display()
                ));
            } else {
                self.write_line(&file.relative.display().to_string());
            }
        }

        if !selection.is_empty() {
            self.write_line("");
        }
        self.write_line(&format!(
            "Found {} files ({})",
            Self::format_number(selection.len()),
            humanize_bytes(selection.total_bytes())
        ));

        Ok(())
    }

    fn format_sweep_result(&self, report: &SweepReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.headline(&report.summary());

        let label = match report.mode {
            OutputMode::Mirror => "Copied to:",
            OutputMode::Archive => "Archive:",
        };
        self.write_line(&format!("  {label:<13}{}", report.output.display()));
        self.write_line(&format!(
            "  {:<13}{} files, {}",
            "Written:",
            Self::format_number(report.files_written),
            humanize_bytes(report.bytes_written)
        ));

        if self.verbose {
            self.write_line(&format!("  {:<13}{:?}", "Duration:", report.duration));
        }

        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("WARNING: {message}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_small() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(7), "7");
        assert_eq!(HumanFormatter::format_number(999), "999");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(12_345), "12,345");
        assert_eq!(HumanFormatter::format_number(123_456), "123,456");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }
}
