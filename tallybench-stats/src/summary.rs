//! Per-series runtime statistics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-instance statistics keyed by instance.
pub type StatsTable = BTreeMap<String, RuntimeStats>;

/// Mean, sample standard deviation, and relative standard deviation for one
/// instance's runtime series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuntimeStats {
    /// Arithmetic mean of the observations.
    pub mean: f64,
    /// Sample standard deviation (Bessel's correction, divisor n-1).
    pub std_dev: f64,
    /// Relative standard deviation, `100 * std_dev / |mean|`, as a
    /// percentage. `None` when the mean is zero and the ratio is undefined;
    /// a zero mean is flagged, never divided through.
    pub rsd: Option<f64>,
}

/// Compute runtime statistics over one complete series of observations.
pub fn compute_stats(samples: &[f64]) -> RuntimeStats {
    if samples.is_empty() {
        return RuntimeStats {
            mean: 0.0,
            std_dev: 0.0,
            rsd: None,
        };
    }

    let mean = samples.iter().sum::<f64>() / samples.len() as f64;

    let std_dev = if samples.len() < 2 {
        0.0
    } else {
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>()
            / (samples.len() - 1) as f64;
        variance.sqrt()
    };

    let rsd = if mean == 0.0 {
        None
    } else {
        Some(100.0 * std_dev / mean.abs())
    };

    RuntimeStats { mean, std_dev, rsd }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        let stats = compute_stats(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        assert!((stats.mean - 30.0).abs() < f64::EPSILON);
        assert!((stats.std_dev - 15.811_388_300_841_896).abs() < 1e-9);
        // 52.70 when rounded at the presentation boundary
        let rsd = stats.rsd.unwrap();
        assert!((rsd - 52.704_627_669_472_99).abs() < 1e-9);
        assert!(((rsd * 100.0).round() / 100.0 - 52.70).abs() < f64::EPSILON);
    }

    #[test]
    fn single_observation_has_zero_dispersion() {
        let stats = compute_stats(&[42.0]);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.rsd, Some(0.0));
    }

    #[test]
    fn zero_mean_flags_rsd_undefined() {
        let stats = compute_stats(&[0.0, 0.0, 0.0]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.rsd, None);
    }

    #[test]
    fn negative_mean_uses_absolute_value() {
        // Runtimes are never negative in practice, but the RSD contract is
        // 100 * stddev / |mean|.
        let stats = compute_stats(&[-10.0, -20.0]);
        assert!(stats.rsd.unwrap() > 0.0);
    }

    #[test]
    fn empty_series_is_inert() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.rsd, None);
    }
}
