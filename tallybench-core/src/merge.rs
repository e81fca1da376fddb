//! Keyed merging of repetition tables.
//!
//! Merging is keyed by instance, never by row position: a repetition file
//! with a missing or reordered row can shift nothing. An instance absent
//! from some repetitions is flagged incomplete instead of silently yielding
//! a shorter series.

use std::collections::{BTreeMap, BTreeSet};

use crate::reader::RunTable;
use crate::record::RunRecord;

/// Runtime observations for one instance across repetitions.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceSeries {
    /// `(repetition index, runtime ms)` pairs in repetition order.
    pub observations: Vec<(usize, f64)>,
    /// Repetition indices this instance was missing from.
    pub missing_repetitions: Vec<usize>,
}

impl InstanceSeries {
    /// Whether every repetition produced an observation.
    pub fn is_complete(&self) -> bool {
        self.missing_repetitions.is_empty()
    }

    /// The runtimes alone, in repetition order.
    pub fn runtimes(&self) -> Vec<f64> {
        self.observations.iter().map(|&(_, r)| r).collect()
    }
}

/// Merged repetitions for one (hardware, variant), keyed by instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSeries {
    /// Per-instance runtime series.
    pub instances: BTreeMap<String, InstanceSeries>,
    /// One representative record per instance (from the first repetition it
    /// appears in), carrying the passthrough metadata.
    pub records: BTreeMap<String, RunRecord>,
}

impl MergedSeries {
    /// Keys of instances observed in every repetition.
    pub fn complete_instances(&self) -> impl Iterator<Item = (&str, &InstanceSeries)> {
        self.instances
            .iter()
            .filter(|(_, s)| s.is_complete())
            .map(|(k, s)| (k.as_str(), s))
    }

    /// Keys of instances missing from at least one repetition.
    pub fn incomplete_instances(&self) -> Vec<String> {
        self.instances
            .iter()
            .filter(|(_, s)| !s.is_complete())
            .map(|(k, _)| k.clone())
            .collect()
    }
}

/// Merge R per-repetition tables for one (hardware, variant) into one
/// series per instance.
///
/// The key set is the union over all repetitions; each series records which
/// repetitions it is missing from so downstream stages can skip or flag it.
pub fn merge_repetitions(tables: &[RunTable]) -> MergedSeries {
    let keys: BTreeSet<&str> = tables
        .iter()
        .flat_map(|t| t.keys().map(String::as_str))
        .collect();

    let mut merged = MergedSeries::default();
    for key in keys {
        let mut observations = Vec::with_capacity(tables.len());
        let mut missing = Vec::new();
        for (rep, table) in tables.iter().enumerate() {
            match table.get(key) {
                Some(record) => {
                    observations.push((rep, record.runtime_ms));
                    merged
                        .records
                        .entry(key.to_string())
                        .or_insert_with(|| record.clone());
                }
                None => missing.push(rep),
            }
        }
        merged.instances.insert(
            key.to_string(),
            InstanceSeries {
                observations,
                missing_repetitions: missing,
            },
        );
    }
    merged
}
