//! Per-repetition CSV loading.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PipelineError;
use crate::record::{derive_instance_key, RawRow, RunMeta, RunRecord};

/// Keyed table of run records from one (hardware, variant, repetition) file.
pub type RunTable = BTreeMap<String, RunRecord>;

/// Load one per-repetition file into a map keyed by instance.
///
/// Read-only: the function never touches the file system beyond reading the
/// given path. Fails with [`PipelineError::MissingFile`] when the file is
/// absent and [`PipelineError::MalformedRow`] when a row lacks required
/// columns or carries a non-numeric runtime.
pub fn read_run_file(path: &Path, instance_prefix: &str) -> Result<RunTable, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let mut reader =
        csv::Reader::from_path(path).map_err(|e| PipelineError::MalformedRow {
            path: path.to_path_buf(),
            row: 0,
            message: e.to_string(),
        })?;

    let mut table = RunTable::new();
    for (idx, row) in reader.deserialize::<RawRow>().enumerate() {
        let row_number = idx + 1;
        let malformed = |message: String| PipelineError::MalformedRow {
            path: path.to_path_buf(),
            row: row_number,
            message,
        };

        let raw = row.map_err(|e| malformed(e.to_string()))?;

        let runtime_ms: f64 = raw
            .runtime
            .trim()
            .parse()
            .map_err(|_| malformed(format!("non-numeric runtime {:?}", raw.runtime)))?;
        if !runtime_ms.is_finite() {
            return Err(malformed(format!("non-finite runtime {:?}", raw.runtime)));
        }

        let instance = derive_instance_key(&raw.file, instance_prefix)?;
        let record = RunRecord {
            instance: instance.clone(),
            runtime_ms,
            meta: RunMeta {
                status: raw.status,
                nodes: raw.nodes,
                omega: raw.omega,
                clique_size: raw.clique_size,
                commandline: raw.commandline,
                started_at: raw.started_at,
            },
        };

        if table.insert(instance.clone(), record).is_some() {
            return Err(PipelineError::DuplicateInstance {
                path: path.to_path_buf(),
                row: row_number,
                key: instance,
            });
        }
    }

    Ok(table)
}
