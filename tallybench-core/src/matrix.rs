//! Run matrix configuration.
//!
//! The matrix is an explicit list of (hardware, variant) combinations plus a
//! repetition count. It drives which files the pipeline reads and which
//! variant is the speedup denominator on each hardware; nothing about it is
//! inferred from file contents.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of timed repetitions per (hardware, variant).
pub const DEFAULT_REPETITIONS: usize = 5;

/// One benchmarked (hardware, variant) cell of the run matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    /// Hardware label, e.g. `"Laptop"`.
    pub hardware: String,
    /// Variant label, e.g. `"original"` or `"colour_class"`.
    pub variant: String,
    /// Whether this variant is the speedup denominator on this hardware.
    #[serde(default)]
    pub baseline: bool,
    /// Per-repetition file name; defaults to `<hardware>_tests_<variant>.csv`.
    #[serde(default)]
    pub file: Option<String>,
}

impl Combination {
    /// File name of this combination inside one repetition directory.
    pub fn file_name(&self) -> String {
        self.file
            .clone()
            .unwrap_or_else(|| format!("{}_tests_{}.csv", self.hardware, self.variant))
    }

    /// Path of repetition `rep` under `results_root`.
    ///
    /// The harness lays runs out as `results_<rep>/<file>`, one directory per
    /// repetition.
    pub fn repetition_path(&self, results_root: &Path, rep: usize) -> PathBuf {
        results_root
            .join(format!("results_{rep}"))
            .join(self.file_name())
    }

    /// `"<hardware>/<variant>"`, used in logs and error reports.
    pub fn label(&self) -> String {
        format!("{}/{}", self.hardware, self.variant)
    }
}

/// The full run matrix driving one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMatrix {
    /// Root directory holding the `results_<rep>` subdirectories.
    pub results_root: PathBuf,
    /// Number of repetitions R; explicit configuration, never inferred.
    pub repetitions: usize,
    /// Directory prefix stripped from the raw `file` column.
    pub instance_prefix: String,
    /// All (hardware, variant) combinations to aggregate.
    pub combinations: Vec<Combination>,
}

impl RunMatrix {
    /// Baseline combination for the given hardware, if one is configured.
    pub fn baseline_for(&self, hardware: &str) -> Option<&Combination> {
        self.combinations
            .iter()
            .find(|c| c.hardware == hardware && c.baseline)
    }

    /// Non-baseline combinations on the given hardware, in configured order.
    pub fn treatments_for<'a>(
        &'a self,
        hardware: &'a str,
    ) -> impl Iterator<Item = &'a Combination> + 'a {
        self.combinations
            .iter()
            .filter(move |c| c.hardware == hardware && !c.baseline)
    }

    /// Distinct hardware labels in first-seen order.
    pub fn hardware_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for combo in &self.combinations {
            if !labels.contains(&combo.hardware.as_str()) {
                labels.push(&combo.hardware);
            }
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(hardware: &str, variant: &str, baseline: bool) -> Combination {
        Combination {
            hardware: hardware.to_string(),
            variant: variant.to_string(),
            baseline,
            file: None,
        }
    }

    #[test]
    fn default_file_name_follows_harness_scheme() {
        let c = Combination {
            file: Some("Laptop_tests_Original.csv".to_string()),
            ..combo("Laptop", "original", true)
        };
        assert_eq!(c.file_name(), "Laptop_tests_Original.csv");
        assert_eq!(
            combo("Cluster", "newline", false).file_name(),
            "Cluster_tests_newline.csv"
        );
    }

    #[test]
    fn repetition_paths_are_per_directory() {
        let c = combo("Laptop", "fmt", false);
        let path = c.repetition_path(Path::new("results"), 3);
        assert_eq!(path, PathBuf::from("results/results_3/Laptop_tests_fmt.csv"));
    }

    #[test]
    fn baseline_and_treatments_split_per_hardware() {
        let matrix = RunMatrix {
            results_root: PathBuf::from("results"),
            repetitions: DEFAULT_REPETITIONS,
            instance_prefix: String::new(),
            combinations: vec![
                combo("Laptop", "original", true),
                combo("Laptop", "newline", false),
                combo("Cluster", "original", true),
            ],
        };

        assert_eq!(matrix.baseline_for("Laptop").unwrap().variant, "original");
        let treatments: Vec<&str> = matrix
            .treatments_for("Laptop")
            .map(|c| c.variant.as_str())
            .collect();
        assert_eq!(treatments, ["newline"]);
        assert_eq!(matrix.hardware_labels(), ["Laptop", "Cluster"]);
        assert!(matrix.baseline_for("Epyc").is_none());
    }
}
