//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use crate::progress::humanize_duration;
use anyhow::Result;
use console::Term;
use console::style;
use zipdir_core::ArchiveReport;

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

    /// Builds the lines printed after a successful run.
    fn result_lines(&self, report: &ArchiveReport) -> Vec<String> {
        let archive = report.archive_path.display();
        if self.quiet {
            return vec![archive.to_string()];
        }

        let mut lines = vec![format!("successfully created: {archive}")];
        lines.push(format!("  Files added:      {}", format_number(report.files_added)));
        lines.push(format!("  Total size:       {}", humanize_bytes(report.bytes_read)));
        lines.push(format!(
            "  Archive size:     {}",
            humanize_bytes(report.bytes_compressed)
        ));

        if self.verbose {
            if report.bytes_read > 0 {
                lines.push(format!(
                    "  Compression:      {:.1}%",
                    report.compression_percentage()
                ));
            }
            lines.push(format!(
                "  Duration:         {}",
                humanize_duration(report.duration)
            ));
        }

        lines
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_result(&self, report: &ArchiveReport) -> Result<()> {
        let lines = self.result_lines(report);
        for (i, line) in lines.iter().enumerate() {
            if i == 0 && !self.quiet && self.use_colors {
                self.term
                    .write_line(&format!("{} {line}", style("✓").green().bold()))?;
            } else {
                self.term.write_line(line)?;
            }
        }
        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

/// Groups digits with commas.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();

    for (count, c) in s.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result.chars().rev().collect()
}
