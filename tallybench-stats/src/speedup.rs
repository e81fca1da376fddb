//! Baseline-relative speedup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tallybench_core::PipelineError;

use crate::summary::StatsTable;

/// Speedup of a treatment variant over the baseline for one instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SpeedupValue {
    /// `baseline_mean / variant_mean`.
    Ratio(f64),
    /// The ratio is undefined (zero baseline or variant mean). Carried as an
    /// explicit flag; never exported as a silent NaN or infinity.
    Undefined,
}

impl SpeedupValue {
    /// The defined ratio, if any.
    pub fn ratio(self) -> Option<f64> {
        match self {
            SpeedupValue::Ratio(r) => Some(r),
            SpeedupValue::Undefined => None,
        }
    }
}

impl std::fmt::Display for SpeedupValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpeedupValue::Ratio(r) => write!(f, "{r:.2}"),
            SpeedupValue::Undefined => write!(f, "undefined"),
        }
    }
}

/// Instance-wise speedups of one treatment variant against the baseline.
///
/// Both sides must cover the identical instance key set; any key present on
/// one side only raises [`PipelineError::Alignment`] naming the offenders.
/// Misalignment is never resolved by truncation or padding.
pub fn compute_speedups(
    baseline_label: &str,
    baseline: &StatsTable,
    variant_label: &str,
    variant: &StatsTable,
) -> Result<BTreeMap<String, SpeedupValue>, PipelineError> {
    let missing_from_variant: Vec<String> = baseline
        .keys()
        .filter(|k| !variant.contains_key(*k))
        .cloned()
        .collect();
    let missing_from_baseline: Vec<String> = variant
        .keys()
        .filter(|k| !baseline.contains_key(*k))
        .cloned()
        .collect();

    if !missing_from_variant.is_empty() || !missing_from_baseline.is_empty() {
        return Err(PipelineError::Alignment {
            left: baseline_label.to_string(),
            right: variant_label.to_string(),
            missing_left: missing_from_baseline,
            missing_right: missing_from_variant,
        });
    }

    Ok(baseline
        .iter()
        .map(|(key, base)| {
            let stats = &variant[key];
            let value = if base.mean == 0.0 || stats.mean == 0.0 {
                SpeedupValue::Undefined
            } else {
                SpeedupValue::Ratio(base.mean / stats.mean)
            };
            (key.clone(), value)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::compute_stats;

    fn stats_table(entries: &[(&str, f64)]) -> StatsTable {
        entries
            .iter()
            .map(|&(k, mean)| {
                (
                    k.to_string(),
                    crate::RuntimeStats {
                        mean,
                        std_dev: 0.0,
                        rsd: if mean == 0.0 { None } else { Some(0.0) },
                    },
                )
            })
            .collect()
    }

    #[test]
    fn four_x_speedup() {
        let baseline = stats_table(&[("A", 100.0)]);
        let variant = stats_table(&[("A", 25.0)]);
        let speedups = compute_speedups("original", &baseline, "fmt", &variant).unwrap();
        assert_eq!(speedups["A"].ratio(), Some(4.0));
    }

    #[test]
    fn zero_variant_mean_is_flagged() {
        let baseline = stats_table(&[("A", 100.0)]);
        let variant = stats_table(&[("A", 0.0)]);
        let speedups = compute_speedups("original", &baseline, "fmt", &variant).unwrap();
        assert_eq!(speedups["A"], SpeedupValue::Undefined);
    }

    #[test]
    fn zero_baseline_mean_is_flagged_not_exported_as_number() {
        let baseline = stats_table(&[("A", 0.0)]);
        let variant = stats_table(&[("A", 25.0)]);
        let speedups = compute_speedups("original", &baseline, "fmt", &variant).unwrap();
        assert_eq!(speedups["A"], SpeedupValue::Undefined);
        assert_eq!(speedups["A"].ratio(), None);
    }

    #[test]
    fn misaligned_key_sets_raise_alignment_error() {
        let baseline = stats_table(&[("A", 100.0), ("B", 50.0)]);
        let variant = stats_table(&[("A", 25.0), ("C", 10.0)]);
        match compute_speedups("original", &baseline, "fmt", &variant).unwrap_err() {
            PipelineError::Alignment {
                missing_left,
                missing_right,
                ..
            } => {
                assert_eq!(missing_left, ["C"]);
                assert_eq!(missing_right, ["B"]);
            }
            other => panic!("expected Alignment, got {other:?}"),
        }
    }

    #[test]
    fn scenario_two_instances_two_reps() {
        // Laptop, variants {original, newline}, R=2.
        let baseline: StatsTable = [
            ("A".to_string(), compute_stats(&[10.0, 10.0])),
            ("B".to_string(), compute_stats(&[20.0, 20.0])),
        ]
        .into_iter()
        .collect();
        let newline: StatsTable = [
            ("A".to_string(), compute_stats(&[5.0, 5.0])),
            ("B".to_string(), compute_stats(&[25.0, 15.0])),
        ]
        .into_iter()
        .collect();

        assert_eq!(baseline["A"].mean, 10.0);
        assert_eq!(newline["A"].mean, 5.0);
        assert_eq!(baseline["B"].mean, 20.0);
        assert_eq!(newline["B"].mean, 20.0);

        let speedups = compute_speedups("original", &baseline, "newline", &newline).unwrap();
        assert_eq!(speedups["A"].ratio(), Some(2.0));
        assert_eq!(speedups["B"].ratio(), Some(1.0));
    }
}
