//! Table reshaping.
//!
//! Pure transformations from the merged/statistics shapes into the three
//! canonical views. Everything stays keyed by instance and variant so the
//! views can be joined independently later.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tallybench_core::{MergedSeries, RunMeta};
use tallybench_stats::{SpeedupValue, StatsTable};

/// One (instance, variant, repetition) observation in the long-form runtime
/// view. Feeds swarm/strip-style visualizations of the raw spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeRow {
    /// Instance key.
    pub instance: String,
    /// Variant label.
    pub variant: String,
    /// Zero-based repetition index.
    pub repetition: usize,
    /// Observed runtime in milliseconds.
    pub runtime_ms: f64,
}

/// One (instance, variant) entry of the long-form speedup view; variants are
/// non-baseline only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedupRow {
    /// Instance key.
    pub instance: String,
    /// Treatment variant label.
    pub variant: String,
    /// Speedup against the baseline, or an explicit undefined flag.
    pub speedup: SpeedupValue,
}

/// One instance row of the report summary table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Instance key (unescaped; display escaping happens at export).
    pub instance: String,
    /// Baseline mean runtime in milliseconds.
    pub avg_runtime_ms: f64,
    /// Baseline relative standard deviation; `None` when flagged undefined.
    pub rsd: Option<f64>,
    /// Per-variant speedups, keyed by non-baseline variant label.
    pub speedups: BTreeMap<String, SpeedupValue>,
    /// Passthrough metadata from the baseline run.
    pub meta: RunMeta,
}

/// Melt one variant's merged wide table into long-form runtime rows.
///
/// Incomplete instances contribute rows for the repetitions that do exist;
/// the raw-spread view loses nothing.
pub fn melt_runtimes(variant: &str, merged: &MergedSeries) -> Vec<RuntimeRow> {
    let mut rows = Vec::new();
    for (instance, series) in &merged.instances {
        for &(repetition, runtime_ms) in &series.observations {
            rows.push(RuntimeRow {
                instance: instance.clone(),
                variant: variant.to_string(),
                repetition,
                runtime_ms,
            });
        }
    }
    rows
}

/// Pivot long-form runtime rows of a single variant back into wide
/// per-instance series. Inverse of [`melt_runtimes`]: rows belonging to
/// other variants are ignored.
pub fn pivot_runtimes(variant: &str, rows: &[RuntimeRow]) -> BTreeMap<String, Vec<(usize, f64)>> {
    let mut wide: BTreeMap<String, Vec<(usize, f64)>> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.variant == variant) {
        wide.entry(row.instance.clone())
            .or_default()
            .push((row.repetition, row.runtime_ms));
    }
    for series in wide.values_mut() {
        series.sort_by_key(|&(rep, _)| rep);
    }
    wide
}

/// Flatten one variant's instance-wise speedups into long-form rows.
pub fn speedup_rows(
    variant: &str,
    speedups: &BTreeMap<String, SpeedupValue>,
) -> Vec<SpeedupRow> {
    speedups
        .iter()
        .map(|(instance, &speedup)| SpeedupRow {
            instance: instance.clone(),
            variant: variant.to_string(),
            speedup,
        })
        .collect()
}

/// Build the summary table: one row per baseline instance, stably sorted by
/// average runtime ascending (ties keep instance-key order).
///
/// `variant_speedups` maps each non-baseline variant label to its
/// instance-wise speedups. Instances without a baseline statistic (flagged
/// incomplete upstream) do not appear.
pub fn build_summary(
    baseline: &MergedSeries,
    baseline_stats: &StatsTable,
    variant_speedups: &BTreeMap<String, BTreeMap<String, SpeedupValue>>,
) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = baseline_stats
        .iter()
        .map(|(instance, stats)| {
            let speedups = variant_speedups
                .iter()
                .filter_map(|(variant, per_instance)| {
                    per_instance
                        .get(instance)
                        .map(|&value| (variant.clone(), value))
                })
                .collect();
            let meta = baseline
                .records
                .get(instance)
                .map(|r| r.meta.clone())
                .unwrap_or_else(|| RunMeta {
                    status: String::new(),
                    nodes: String::new(),
                    omega: String::new(),
                    clique_size: String::new(),
                    commandline: String::new(),
                    started_at: String::new(),
                });
            SummaryRow {
                instance: instance.clone(),
                avg_runtime_ms: stats.mean,
                rsd: stats.rsd,
                speedups,
                meta,
            }
        })
        .collect();

    // BTreeMap iteration gives instance-key order; sort_by is stable, so
    // equal runtimes preserve it.
    rows.sort_by(|a, b| {
        a.avg_runtime_ms
            .partial_cmp(&b.avg_runtime_ms)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use tallybench_core::{merge_repetitions, RunRecord, RunTable};
    use tallybench_stats::compute_stats;

    fn record(instance: &str, runtime_ms: f64) -> RunRecord {
        RunRecord {
            instance: instance.to_string(),
            runtime_ms,
            meta: RunMeta {
                status: "true".to_string(),
                nodes: "7".to_string(),
                omega: "3".to_string(),
                clique_size: "3".to_string(),
                commandline: format!("./solver {instance}"),
                started_at: "2024-05-01T10:00:00".to_string(),
            },
        }
    }

    fn table(entries: &[(&str, f64)]) -> RunTable {
        entries
            .iter()
            .map(|&(k, r)| (k.to_string(), record(k, r)))
            .collect()
    }

    #[test]
    fn melt_then_pivot_round_trips() {
        let merged = merge_repetitions(&[
            table(&[("A", 10.0), ("B", 20.0)]),
            table(&[("A", 12.0)]), // B missing in rep 1
            table(&[("A", 11.0), ("B", 21.0)]),
        ]);

        let rows = melt_runtimes("original", &merged);
        let wide = pivot_runtimes("original", &rows);

        assert_eq!(wide.len(), merged.instances.len());
        for (instance, series) in &merged.instances {
            assert_eq!(wide[instance], series.observations);
        }
    }

    #[test]
    fn pivot_ignores_other_variants() {
        let rows = vec![
            RuntimeRow {
                instance: "A".to_string(),
                variant: "fmt".to_string(),
                repetition: 0,
                runtime_ms: 1.0,
            },
            RuntimeRow {
                instance: "A".to_string(),
                variant: "original".to_string(),
                repetition: 0,
                runtime_ms: 2.0,
            },
        ];
        let wide = pivot_runtimes("fmt", &rows);
        assert_eq!(wide["A"], [(0, 1.0)]);
    }

    #[test]
    fn summary_sort_is_stable_on_ties() {
        let merged = merge_repetitions(&[table(&[
            ("zeta", 5.0),
            ("alpha", 5.0),
            ("mid", 3.0),
        ])]);
        let stats: StatsTable = merged
            .instances
            .iter()
            .map(|(k, s)| (k.clone(), compute_stats(&s.runtimes())))
            .collect();

        let rows = build_summary(&merged, &stats, &BTreeMap::new());
        let order: Vec<&str> = rows.iter().map(|r| r.instance.as_str()).collect();
        // "mid" first (3.0), then the 5.0 tie in instance-key order.
        assert_eq!(order, ["mid", "alpha", "zeta"]);
    }

    #[test]
    fn summary_rows_carry_speedups_and_metadata() {
        let merged = merge_repetitions(&[table(&[("A", 10.0)]), table(&[("A", 10.0)])]);
        let stats: StatsTable = [("A".to_string(), compute_stats(&[10.0, 10.0]))]
            .into_iter()
            .collect();
        let speedups: BTreeMap<String, BTreeMap<String, SpeedupValue>> = [(
            "newline".to_string(),
            [("A".to_string(), SpeedupValue::Ratio(2.0))]
                .into_iter()
                .collect(),
        )]
        .into_iter()
        .collect();

        let rows = build_summary(&merged, &stats, &speedups);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].avg_runtime_ms, 10.0);
        assert_eq!(rows[0].speedups["newline"].ratio(), Some(2.0));
        assert_eq!(rows[0].meta.commandline, "./solver A");
    }

    #[test]
    fn speedup_rows_are_per_instance() {
        let speedups: BTreeMap<String, SpeedupValue> = [
            ("A".to_string(), SpeedupValue::Ratio(2.0)),
            ("B".to_string(), SpeedupValue::Undefined),
        ]
        .into_iter()
        .collect();
        let rows = speedup_rows("vector", &speedups);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].variant, "vector");
        assert_eq!(rows[1].speedup, SpeedupValue::Undefined);
    }
}
