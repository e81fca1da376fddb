//! The data-driven aggregation pipeline.
//!
//! One parameterized pass over the configured run matrix replaces the
//! original per-hardware, per-variant script duplication. Combinations are
//! independent: each one reads its own repetition files (in parallel, there
//! is no ordering dependency between reads) and a failure in one never
//! halts the others. The merge before statistics is the only join point.

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

use tallybench_core::{
    merge_repetitions, read_run_file, Combination, MergedSeries, PipelineError, RunMatrix,
};
use tallybench_report::{
    build_summary, melt_runtimes, speedup_rows, CombinationOutcome, CombinationStatus,
    HardwareReport, Report, ReportMeta, RunSummary, SpeedupRow,
};
use tallybench_stats::{
    aggregate_speedups, compute_stats, compute_speedups, SpeedupValue, StatsTable,
};

/// Loaded and summarized data for one combination.
struct ComboData {
    merged: MergedSeries,
    /// Per-instance statistics over complete series only.
    stats: StatsTable,
    /// Instances flagged incomplete and excluded from statistics.
    incomplete: Vec<String>,
}

/// Run the whole pipeline over the given matrix and assemble the report.
///
/// Pure function of the files on disk: no intermediate state survives
/// between invocations, so identical inputs produce identical tables.
pub fn run_pipeline(matrix: &RunMatrix) -> Report {
    let start = Instant::now();
    info!(
        combinations = matrix.combinations.len(),
        repetitions = matrix.repetitions,
        root = %matrix.results_root.display(),
        "aggregating run matrix"
    );

    let loaded: Vec<Result<ComboData, PipelineError>> = matrix
        .combinations
        .par_iter()
        .map(|combo| load_combination(matrix, combo))
        .collect();

    let mut data: BTreeMap<String, ComboData> = BTreeMap::new();
    let mut failures: BTreeMap<String, String> = BTreeMap::new();
    for (combo, result) in matrix.combinations.iter().zip(loaded) {
        match result {
            Ok(combo_data) => {
                data.insert(combo.label(), combo_data);
            }
            Err(err) => {
                warn!(combination = %combo.label(), error = %err, "combination failed");
                failures.insert(combo.label(), err.to_string());
            }
        }
    }

    let mut hardware_reports = Vec::new();
    for hardware in matrix.hardware_labels() {
        hardware_reports.push(build_hardware_report(
            matrix,
            hardware,
            &data,
            &mut failures,
        ));
    }

    let combinations: Vec<CombinationOutcome> = matrix
        .combinations
        .iter()
        .map(|combo| {
            let label = combo.label();
            let (status, instance_count, incomplete) = match failures.get(&label) {
                Some(reason) => (
                    CombinationStatus::Failed {
                        reason: reason.clone(),
                    },
                    data.get(&label).map_or(0, |d| d.stats.len()),
                    data.get(&label).map_or_else(Vec::new, |d| d.incomplete.clone()),
                ),
                None => {
                    let combo_data = &data[&label];
                    (
                        CombinationStatus::Ok,
                        combo_data.stats.len(),
                        combo_data.incomplete.clone(),
                    )
                }
            };
            CombinationOutcome {
                hardware: combo.hardware.clone(),
                variant: combo.variant.clone(),
                baseline: combo.baseline,
                status,
                instance_count,
                incomplete_instances: incomplete,
            }
        })
        .collect();

    let succeeded = combinations.iter().filter(|c| c.status.is_ok()).count();
    let flagged = combinations
        .iter()
        .filter(|c| !c.incomplete_instances.is_empty())
        .map(|c| {
            (
                format!("{}/{}", c.hardware, c.variant),
                c.incomplete_instances.len(),
            )
        })
        .collect();

    let summary = RunSummary {
        total_combinations: combinations.len(),
        succeeded,
        failed: combinations.len() - succeeded,
        flagged,
        total_duration_ms: start.elapsed().as_secs_f64() * 1000.0,
    };

    Report {
        meta: ReportMeta {
            schema_version: 1,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono_now(),
            results_root: matrix.results_root.display().to_string(),
            repetitions: matrix.repetitions,
            instance_prefix: matrix.instance_prefix.clone(),
        },
        combinations,
        hardware: hardware_reports,
        summary,
    }
}

fn chrono_now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

/// Read and merge all repetition files for one combination.
fn load_combination(
    matrix: &RunMatrix,
    combo: &Combination,
) -> Result<ComboData, PipelineError> {
    let tables = (0..matrix.repetitions)
        .into_par_iter()
        .map(|rep| {
            let path = combo.repetition_path(&matrix.results_root, rep);
            debug!(combination = %combo.label(), rep, path = %path.display(), "reading");
            read_run_file(&path, &matrix.instance_prefix)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let merged = merge_repetitions(&tables);
    let incomplete = merged.incomplete_instances();
    if !incomplete.is_empty() {
        warn!(
            combination = %combo.label(),
            instances = ?incomplete,
            "incomplete series flagged; excluded from statistics"
        );
    }

    let stats = merged
        .complete_instances()
        .map(|(key, series)| (key.to_string(), compute_stats(&series.runtimes())))
        .collect();

    Ok(ComboData {
        merged,
        stats,
        incomplete,
    })
}

/// Assemble the shaped tables for one hardware label.
///
/// Speedup alignment failures are recorded against the treatment
/// combination in `failures`; its runtime rows are kept (the raw data
/// loaded fine), only the speedup side is dropped.
fn build_hardware_report(
    matrix: &RunMatrix,
    hardware: &str,
    data: &BTreeMap<String, ComboData>,
    failures: &mut BTreeMap<String, String>,
) -> HardwareReport {
    let mut runtime_rows = Vec::new();
    for combo in matrix.combinations.iter().filter(|c| c.hardware == hardware) {
        if let Some(combo_data) = data.get(&combo.label()) {
            runtime_rows.extend(melt_runtimes(&combo.variant, &combo_data.merged));
        }
    }

    let variants: Vec<String> = matrix
        .treatments_for(hardware)
        .map(|c| c.variant.clone())
        .collect();

    let baseline_combo = matrix.baseline_for(hardware);
    let baseline_data = baseline_combo.and_then(|c| data.get(&c.label()));

    let mut speedup_table_rows: Vec<SpeedupRow> = Vec::new();
    let mut variant_speedups: BTreeMap<String, BTreeMap<String, SpeedupValue>> = BTreeMap::new();
    let mut aggregates = Vec::new();

    match (baseline_combo, baseline_data) {
        (Some(base_combo), Some(base_data)) => {
            for treatment in matrix.treatments_for(hardware) {
                let Some(treatment_data) = data.get(&treatment.label()) else {
                    continue;
                };
                let (base_stats, treat_stats) = aligned_stats(base_data, treatment_data);
                match compute_speedups(
                    &base_combo.variant,
                    &base_stats,
                    &treatment.variant,
                    &treat_stats,
                ) {
                    Ok(speedups) => {
                        speedup_table_rows.extend(speedup_rows(&treatment.variant, &speedups));
                        aggregates.push(aggregate_speedups(&treatment.variant, &speedups));
                        variant_speedups.insert(treatment.variant.clone(), speedups);
                    }
                    Err(err) => {
                        warn!(
                            combination = %treatment.label(),
                            error = %err,
                            "speedup computation failed"
                        );
                        failures.insert(treatment.label(), err.to_string());
                    }
                }
            }
        }
        (Some(base_combo), None) => {
            warn!(
                hardware,
                baseline = %base_combo.label(),
                "baseline combination unavailable; speedups skipped"
            );
        }
        (None, _) => {
            warn!(hardware, "no baseline configured; speedups skipped");
        }
    }

    let summary = match baseline_data {
        Some(base_data) => build_summary(&base_data.merged, &base_data.stats, &variant_speedups),
        None => Vec::new(),
    };

    HardwareReport {
        hardware: hardware.to_string(),
        runtime_rows,
        speedup_rows: speedup_table_rows,
        summary,
        aggregates,
        variants,
    }
}

/// Drop instances flagged incomplete on either side before the strict
/// alignment check; genuine key-set mismatches still raise.
fn aligned_stats(baseline: &ComboData, treatment: &ComboData) -> (StatsTable, StatsTable) {
    let mut base = baseline.stats.clone();
    let mut treat = treatment.stats.clone();
    for key in baseline.incomplete.iter().chain(treatment.incomplete.iter()) {
        base.remove(key);
        treat.remove(key);
    }
    (base, treat)
}
