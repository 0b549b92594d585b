//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use crate::error::describe;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use zipdir_core::ArchiveReport;

const OPERATION: &str = "compress";

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct CompressOutput {
    archive_path: String,
    files_added: usize,
    bytes_read: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    duration_ms: u128,
}

impl From<&ArchiveReport> for CompressOutput {
    fn from(report: &ArchiveReport) -> Self {
        Self {
            archive_path: report.archive_path.display().to_string(),
            files_added: report.files_added,
            bytes_read: report.bytes_read,
            bytes_compressed: report.bytes_compressed,
            compression_ratio: report.compression_ratio(),
            compression_percentage: report.compression_percentage(),
            duration_ms: report.duration.as_millis(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(mut writer: impl Write, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(writer, "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_result(&self, report: &ArchiveReport) -> Result<()> {
        let output = JsonOutput::success(OPERATION, CompressOutput::from(report));
        Self::output(io::stdout(), &output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error(OPERATION, describe(error));
        let _ = Self::output(io::stderr(), &output);
    }
}
