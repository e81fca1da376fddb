//! Second-order statistics over speedup values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::speedup::SpeedupValue;
use crate::summary::{compute_stats, RuntimeStats};

/// Per-variant aggregate over the defined speedup values across all
/// instances: mean/stddev/RSD of the speedups themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedupAggregate {
    /// Treatment variant label.
    pub variant: String,
    /// Statistics over the defined speedup values.
    pub stats: RuntimeStats,
    /// Number of instances with a defined speedup.
    pub defined_count: usize,
    /// Instances whose speedup was flagged undefined and excluded.
    pub undefined_instances: Vec<String>,
}

/// Aggregate one variant's instance-wise speedups into a single summary.
///
/// Undefined speedups are excluded from the statistics and listed rather
/// than being folded in as zeros or infinities.
pub fn aggregate_speedups(
    variant: &str,
    speedups: &BTreeMap<String, SpeedupValue>,
) -> SpeedupAggregate {
    let mut defined = Vec::with_capacity(speedups.len());
    let mut undefined_instances = Vec::new();
    for (instance, value) in speedups {
        match value.ratio() {
            Some(ratio) => defined.push(ratio),
            None => undefined_instances.push(instance.clone()),
        }
    }

    SpeedupAggregate {
        variant: variant.to_string(),
        stats: compute_stats(&defined),
        defined_count: defined.len(),
        undefined_instances,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregates_defined_speedups_only() {
        let speedups: BTreeMap<String, SpeedupValue> = [
            ("A".to_string(), SpeedupValue::Ratio(2.0)),
            ("B".to_string(), SpeedupValue::Ratio(4.0)),
            ("C".to_string(), SpeedupValue::Undefined),
        ]
        .into_iter()
        .collect();

        let agg = aggregate_speedups("newline", &speedups);
        assert_eq!(agg.variant, "newline");
        assert_eq!(agg.defined_count, 2);
        assert_eq!(agg.undefined_instances, ["C"]);
        assert!((agg.stats.mean - 3.0).abs() < f64::EPSILON);
        // sample stddev of [2, 4] is sqrt(2)
        assert!((agg.stats.std_dev - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn all_undefined_yields_inert_stats() {
        let speedups: BTreeMap<String, SpeedupValue> =
            [("A".to_string(), SpeedupValue::Undefined)].into_iter().collect();
        let agg = aggregate_speedups("fmt", &speedups);
        assert_eq!(agg.defined_count, 0);
        assert_eq!(agg.stats.rsd, None);
    }
}
