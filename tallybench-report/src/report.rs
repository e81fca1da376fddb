//! Report data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tallybench_stats::SpeedupAggregate;

use crate::tables::{RuntimeRow, SpeedupRow, SummaryRow};

/// Complete aggregation report for one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Invocation metadata.
    pub meta: ReportMeta,
    /// Per-(hardware, variant) outcomes, in configured order.
    pub combinations: Vec<CombinationOutcome>,
    /// Shaped tables per hardware label.
    pub hardware: Vec<HardwareReport>,
    /// Success/failure counts across combinations.
    pub summary: RunSummary,
}

/// Report metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Report schema version.
    pub schema_version: u32,
    /// Tool version that produced the report.
    pub version: String,
    /// Generation timestamp.
    pub timestamp: DateTime<Utc>,
    /// Results root the inputs were read from.
    pub results_root: String,
    /// Configured repetition count R.
    pub repetitions: usize,
    /// Configured instance prefix.
    pub instance_prefix: String,
}

/// Outcome of one (hardware, variant) combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinationOutcome {
    /// Hardware label.
    pub hardware: String,
    /// Variant label.
    pub variant: String,
    /// Whether this variant is the baseline on its hardware.
    pub baseline: bool,
    /// Success or failure with reason.
    pub status: CombinationStatus,
    /// Number of instances with a complete series.
    pub instance_count: usize,
    /// Instances flagged incomplete (present in only some repetitions).
    pub incomplete_instances: Vec<String>,
}

/// Success or failure of one combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CombinationStatus {
    /// All repetition files loaded and merged.
    Ok,
    /// The combination failed; independent combinations were unaffected.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl CombinationStatus {
    /// Whether this outcome is a success.
    pub fn is_ok(&self) -> bool {
        matches!(self, CombinationStatus::Ok)
    }
}

/// All shaped tables for one hardware label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareReport {
    /// Hardware label.
    pub hardware: String,
    /// Long-form runtime view across all variants on this hardware.
    pub runtime_rows: Vec<RuntimeRow>,
    /// Long-form speedup view across non-baseline variants.
    pub speedup_rows: Vec<SpeedupRow>,
    /// Summary table, sorted by average runtime ascending.
    pub summary: Vec<SummaryRow>,
    /// Second-order speedup aggregates per non-baseline variant.
    pub aggregates: Vec<SpeedupAggregate>,
    /// Non-baseline variant labels in configured order (summary columns).
    pub variants: Vec<String>,
}

/// Success/failure counts across all combinations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total combinations configured.
    pub total_combinations: usize,
    /// Combinations that loaded and merged successfully.
    pub succeeded: usize,
    /// Combinations that failed.
    pub failed: usize,
    /// Instances flagged incomplete, per combination label.
    pub flagged: BTreeMap<String, usize>,
    /// Total pipeline wall time in milliseconds.
    pub total_duration_ms: f64,
}
