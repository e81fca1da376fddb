#![warn(missing_docs)]
//! Tallybench Report - Reshaping and Output
//!
//! Produces the canonical shapes downstream sinks consume:
//! - Long-form runtime table (one row per instance, variant, repetition)
//! - Long-form speedup table (one row per instance, non-baseline variant)
//! - Summary table (one row per instance, one speedup column per variant)
//!
//! and renders them as JSON (machine-readable) or delimited text with a
//! configurable field separator for direct inclusion in typeset tables.

mod export;
mod render;
mod report;
mod tables;

pub use export::{generate_json_report, runtime_csv, speedup_csv, summary_csv, ExportOptions};
pub use render::{format_rsd, latex_escape, round2};
pub use report::{
    CombinationOutcome, CombinationStatus, HardwareReport, Report, ReportMeta, RunSummary,
};
pub use tables::{
    build_summary, melt_runtimes, pivot_runtimes, speedup_rows, RuntimeRow, SpeedupRow, SummaryRow,
};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with the full report schema
    Json,
    /// Delimited summary tables
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_output_formats() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
