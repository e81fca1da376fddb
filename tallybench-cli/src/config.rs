//! Configuration loading from tallybench.toml.
//!
//! Tallybench configuration can be specified in a `tallybench.toml` file in
//! the project root. The configuration is automatically discovered by
//! walking up from the current directory; CLI flags override it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use tallybench_core::{Combination, RunMatrix, DEFAULT_REPETITIONS};

/// Tallybench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TallyConfig {
    /// Input configuration: where the harness CSV files live.
    #[serde(default)]
    pub input: InputConfig,
    /// Output configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

/// One `[[input.combinations]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboConfig {
    /// Hardware label, e.g. "Laptop".
    pub hardware: String,
    /// Variant label, e.g. "colour_class".
    pub variant: String,
    /// Whether this variant is the speedup denominator on this hardware.
    #[serde(default)]
    pub baseline: bool,
    /// Per-repetition file name override.
    #[serde(default)]
    pub file: Option<String>,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Root directory holding `results_<rep>` subdirectories.
    #[serde(default = "default_results_root")]
    pub results_root: String,
    /// Number of repetitions R; explicit, never inferred from files.
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    /// Directory prefix stripped from the raw `file` column.
    #[serde(default = "default_instance_prefix")]
    pub instance_prefix: String,
    /// The run matrix; defaults to the full harness matrix when omitted.
    #[serde(default)]
    pub combinations: Vec<ComboConfig>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            results_root: default_results_root(),
            repetitions: default_repetitions(),
            instance_prefix: default_instance_prefix(),
            combinations: Vec::new(),
        }
    }
}

fn default_results_root() -> String {
    "results".to_string()
}
fn default_repetitions() -> usize {
    DEFAULT_REPETITIONS
}
fn default_instance_prefix() -> String {
    "test-instances/DIMACS_all_ascii/".to_string()
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv".
    #[serde(default = "default_format")]
    pub format: String,
    /// Field delimiter for delimited exports (single ASCII character).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Escape instance names for LaTeX in delimited exports.
    #[serde(default)]
    pub latex_instances: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            delimiter: default_delimiter(),
            latex_instances: false,
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_delimiter() -> String {
    ";".to_string()
}

/// The matrix the original harness runs: every variant on the laptop, the
/// cheap variants on the cluster, `original` as baseline everywhere.
fn default_combinations() -> Vec<ComboConfig> {
    let mut combos = Vec::new();
    let laptop = [
        ("original", "Original", true),
        ("newline", "Newline", false),
        ("fmt", "FMT", false),
        ("colour_class", "Colour_Class", false),
        ("vector", "Vector", false),
        ("comment", "Comment", false),
        ("max", "Max", false),
    ];
    for &(variant, tag, baseline) in &laptop {
        combos.push(ComboConfig {
            hardware: "Laptop".to_string(),
            variant: variant.to_string(),
            baseline,
            file: Some(format!("Laptop_tests_{tag}.csv")),
        });
    }
    for &(variant, tag, baseline) in &laptop[..4] {
        combos.push(ComboConfig {
            hardware: "Cluster".to_string(),
            variant: variant.to_string(),
            baseline,
            file: Some(format!("Cluster_tests_{tag}.csv")),
        });
    }
    combos
}

impl TallyConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from the
    /// current directory.
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("tallybench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Validate and convert into the run matrix that drives the pipeline.
    pub fn to_matrix(&self) -> anyhow::Result<RunMatrix> {
        if self.input.repetitions == 0 {
            anyhow::bail!("repetitions must be at least 1");
        }

        let combos = if self.input.combinations.is_empty() {
            default_combinations()
        } else {
            self.input.combinations.clone()
        };

        let combinations: Vec<Combination> = combos
            .iter()
            .map(|c| Combination {
                hardware: c.hardware.clone(),
                variant: c.variant.clone(),
                baseline: c.baseline,
                file: c.file.clone(),
            })
            .collect();

        let matrix = RunMatrix {
            results_root: PathBuf::from(&self.input.results_root),
            repetitions: self.input.repetitions,
            instance_prefix: self.input.instance_prefix.clone(),
            combinations,
        };

        for hardware in matrix.hardware_labels() {
            let baselines = matrix
                .combinations
                .iter()
                .filter(|c| c.hardware == hardware && c.baseline)
                .count();
            if baselines != 1 {
                anyhow::bail!(
                    "hardware {:?} must have exactly one baseline variant, found {}",
                    hardware,
                    baselines
                );
            }
        }

        Ok(matrix)
    }

    /// The configured delimiter as a single ASCII byte.
    pub fn delimiter_byte(&self) -> anyhow::Result<u8> {
        let s = &self.output.delimiter;
        if s.len() == 1 && s.is_ascii() {
            Ok(s.as_bytes()[0])
        } else {
            anyhow::bail!("delimiter must be a single ASCII character, got {:?}", s)
        }
    }

    /// Generate a default configuration as a TOML string.
    pub fn default_toml() -> String {
        r#"# Tallybench Configuration

[input]
# Root directory holding results_<rep> subdirectories
results_root = "results"
# Number of timed repetitions per (hardware, variant); never inferred
repetitions = 5
# Directory prefix stripped from the raw `file` column
instance_prefix = "test-instances/DIMACS_all_ascii/"

# The run matrix. Exactly one baseline per hardware.
[[input.combinations]]
hardware = "Laptop"
variant = "original"
baseline = true
file = "Laptop_tests_Original.csv"

[[input.combinations]]
hardware = "Laptop"
variant = "newline"
file = "Laptop_tests_Newline.csv"

[[input.combinations]]
hardware = "Laptop"
variant = "fmt"
file = "Laptop_tests_FMT.csv"

[[input.combinations]]
hardware = "Laptop"
variant = "colour_class"
file = "Laptop_tests_Colour_Class.csv"

[[input.combinations]]
hardware = "Laptop"
variant = "vector"
file = "Laptop_tests_Vector.csv"

[[input.combinations]]
hardware = "Laptop"
variant = "comment"
file = "Laptop_tests_Comment.csv"

[[input.combinations]]
hardware = "Laptop"
variant = "max"
file = "Laptop_tests_Max.csv"

[[input.combinations]]
hardware = "Cluster"
variant = "original"
baseline = true
file = "Cluster_tests_Original.csv"

[[input.combinations]]
hardware = "Cluster"
variant = "newline"
file = "Cluster_tests_Newline.csv"

[[input.combinations]]
hardware = "Cluster"
variant = "fmt"
file = "Cluster_tests_FMT.csv"

[[input.combinations]]
hardware = "Cluster"
variant = "colour_class"
file = "Cluster_tests_Colour_Class.csv"

[output]
# Default output format: human, json, csv
format = "human"
# Field delimiter for delimited exports
delimiter = ";"
# Escape instance names for LaTeX table inclusion
latex_instances = false
"#
        .to_string()
    }
}
