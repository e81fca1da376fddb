//! Human-readable output formatting.
//!
//! Terminal-friendly rendering of the run report: per-combination outcomes
//! with status icons, incomplete-series flags, aggregate speedups, and the
//! summary table.

use tallybench_report::{format_rsd, CombinationStatus, Report};

/// Format a report for human-readable terminal display.
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("Tallybench Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    // Per-combination run summary first: which succeeded, which failed.
    output.push_str("Combinations\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    for outcome in &report.combinations {
        let icon = if outcome.status.is_ok() { "✓" } else { "✗" };
        let baseline_marker = if outcome.baseline { " (baseline)" } else { "" };
        output.push_str(&format!(
            "  {} {}/{}{}",
            icon, outcome.hardware, outcome.variant, baseline_marker
        ));
        match &outcome.status {
            CombinationStatus::Ok => {
                output.push_str(&format!("  {} instances\n", outcome.instance_count));
            }
            CombinationStatus::Failed { reason } => {
                output.push_str(&format!("\n      error: {}\n", reason));
            }
        }
        if !outcome.incomplete_instances.is_empty() {
            output.push_str(&format!(
                "      incomplete (flagged): {}\n",
                outcome.incomplete_instances.join(", ")
            ));
        }
    }
    output.push('\n');

    for hw in &report.hardware {
        if hw.summary.is_empty() && hw.aggregates.is_empty() {
            continue;
        }

        output.push_str(&format!("Hardware: {}\n", hw.hardware));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        if !hw.summary.is_empty() {
            let max_name_len = hw
                .summary
                .iter()
                .map(|row| row.instance.len())
                .max()
                .unwrap_or(12)
                .max("Instance".len());

            output.push_str(&format!(
                "  {:<width$}  {:>12}  {:>10}",
                "Instance",
                "avg (ms)",
                "RSD (%)",
                width = max_name_len
            ));
            for variant in &hw.variants {
                output.push_str(&format!("  {:>12}", variant));
            }
            output.push('\n');

            for row in &hw.summary {
                output.push_str(&format!(
                    "  {:<width$}  {:>12.2}  {:>10}",
                    row.instance,
                    row.avg_runtime_ms,
                    format_rsd(row.rsd),
                    width = max_name_len
                ));
                for variant in &hw.variants {
                    let cell = match row.speedups.get(variant) {
                        Some(value) => value.to_string(),
                        None => "undefined".to_string(),
                    };
                    output.push_str(&format!("  {:>12}", cell));
                }
                output.push('\n');
            }
        }

        if !hw.aggregates.is_empty() {
            output.push_str("\n  Speedup vs baseline (across instances)\n");
            for agg in &hw.aggregates {
                output.push_str(&format!(
                    "    {:<14} mean {:>8}  stddev {:>8}  rsd {:>8}  ({} instances",
                    agg.variant,
                    format!("{:.2}", agg.stats.mean),
                    format!("{:.2}", agg.stats.std_dev),
                    format_rsd(agg.stats.rsd),
                    agg.defined_count,
                ));
                if agg.undefined_instances.is_empty() {
                    output.push_str(")\n");
                } else {
                    output.push_str(&format!(
                        ", {} undefined)\n",
                        agg.undefined_instances.len()
                    ));
                }
            }
        }
        output.push('\n');
    }

    output.push_str("Summary\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "  Combinations: {}  Succeeded: {}  Failed: {}\n",
        report.summary.total_combinations, report.summary.succeeded, report.summary.failed
    ));
    output.push_str(&format!(
        "  Duration: {:.2} ms\n",
        report.summary.total_duration_ms
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tallybench_report::{
        CombinationOutcome, HardwareReport, ReportMeta, RunSummary, SummaryRow,
    };

    fn minimal_report() -> Report {
        Report {
            meta: ReportMeta {
                schema_version: 1,
                version: "0.2.0".to_string(),
                timestamp: chrono::Utc::now(),
                results_root: "results".to_string(),
                repetitions: 2,
                instance_prefix: String::new(),
            },
            combinations: vec![
                CombinationOutcome {
                    hardware: "Laptop".to_string(),
                    variant: "original".to_string(),
                    baseline: true,
                    status: CombinationStatus::Ok,
                    instance_count: 1,
                    incomplete_instances: vec![],
                },
                CombinationOutcome {
                    hardware: "Laptop".to_string(),
                    variant: "fmt".to_string(),
                    baseline: false,
                    status: CombinationStatus::Failed {
                        reason: "missing input file: results/results_0/Laptop_tests_FMT.csv"
                            .to_string(),
                    },
                    instance_count: 0,
                    incomplete_instances: vec![],
                },
            ],
            hardware: vec![HardwareReport {
                hardware: "Laptop".to_string(),
                runtime_rows: vec![],
                speedup_rows: vec![],
                summary: vec![SummaryRow {
                    instance: "keller4".to_string(),
                    avg_runtime_ms: 10.0,
                    rsd: Some(1.0),
                    speedups: BTreeMap::new(),
                    meta: tallybench_core::RunMeta {
                        status: "true".to_string(),
                        nodes: "1".to_string(),
                        omega: "1".to_string(),
                        clique_size: "1".to_string(),
                        commandline: "./solver".to_string(),
                        started_at: "t".to_string(),
                    },
                }],
                aggregates: vec![],
                variants: vec!["fmt".to_string()],
            }],
            summary: RunSummary {
                total_combinations: 2,
                succeeded: 1,
                failed: 1,
                flagged: BTreeMap::new(),
                total_duration_ms: 1.5,
            },
        }
    }

    #[test]
    fn lists_outcomes_and_summary_rows() {
        let out = format_human_output(&minimal_report());
        assert!(out.contains("✓ Laptop/original (baseline)"));
        assert!(out.contains("✗ Laptop/fmt"));
        assert!(out.contains("missing input file"));
        assert!(out.contains("keller4"));
        assert!(out.contains("Succeeded: 1  Failed: 1"));
    }

    #[test]
    fn missing_speedup_cells_are_flagged() {
        let out = format_human_output(&minimal_report());
        assert!(out.contains("undefined"));
    }
}
