//! Run records and instance-key derivation.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PipelineError;

/// Passthrough metadata attached to a run record.
///
/// None of these fields enter any computation, but all of them must
/// round-trip verbatim into exported summaries. They are kept as strings so
/// whatever the harness wrote survives unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMeta {
    /// Solver exit status.
    pub status: String,
    /// Search nodes explored.
    pub nodes: String,
    /// Reported omega (clique number bound).
    pub omega: String,
    /// Size of the clique found.
    pub clique_size: String,
    /// Full solver invocation line.
    pub commandline: String,
    /// Harness start timestamp, kept as an opaque string.
    pub started_at: String,
}

/// One timing observation: a single (hardware, variant, repetition, instance)
/// measurement parsed from a harness CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Canonical short instance key (directory prefix and extension stripped).
    pub instance: String,
    /// Wall-clock runtime in milliseconds.
    pub runtime_ms: f64,
    /// Metadata carried through to exports untouched.
    #[serde(flatten)]
    pub meta: RunMeta,
}

/// Raw CSV row as emitted by the run harness.
///
/// Columns not listed here (`hostname`, `proof_model`, `proof_log`) are
/// ignored during deserialization; the hardware label comes from the run
/// matrix, not from the file.
#[derive(Debug, Deserialize)]
pub(crate) struct RawRow {
    pub commandline: String,
    pub started_at: String,
    pub file: String,
    pub status: String,
    pub nodes: String,
    pub omega: String,
    #[serde(rename = "clique")]
    pub clique_size: String,
    pub runtime: String,
}

/// Derive the canonical instance key from the harness `file` column.
///
/// Strips the configured directory prefix with a path operation and then the
/// file extension. A prefix that does not match fails loudly instead of
/// falling back to character-offset slicing.
pub fn derive_instance_key(raw: &str, prefix: &str) -> Result<String, PipelineError> {
    let path = Path::new(raw);
    let relative = if prefix.is_empty() {
        path
    } else {
        path.strip_prefix(prefix)
            .map_err(|_| PipelineError::PrefixMismatch {
                file: raw.to_string(),
                prefix: prefix.to_string(),
            })?
    };

    relative
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| PipelineError::BadInstancePath {
            file: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "test-instances/DIMACS_all_ascii/";

    #[test]
    fn strips_prefix_and_extension() {
        let key = derive_instance_key(
            "test-instances/DIMACS_all_ascii/brock200_1.clq",
            PREFIX,
        )
        .unwrap();
        assert_eq!(key, "brock200_1");
    }

    #[test]
    fn dotted_names_keep_inner_dots() {
        // Only the final extension goes; "C125.9" is the key.
        let key =
            derive_instance_key("test-instances/DIMACS_all_ascii/C125.9.clq", PREFIX).unwrap();
        assert_eq!(key, "C125.9");
    }

    #[test]
    fn prefix_mismatch_is_an_error() {
        let err = derive_instance_key("other-dir/brock200_1.clq", PREFIX).unwrap_err();
        assert!(matches!(err, PipelineError::PrefixMismatch { .. }));
    }

    #[test]
    fn empty_prefix_takes_bare_file_names() {
        let key = derive_instance_key("keller4.clq", "").unwrap();
        assert_eq!(key, "keller4");
    }

    #[test]
    fn bare_prefix_value_is_rejected() {
        let err = derive_instance_key("test-instances/DIMACS_all_ascii/", PREFIX).unwrap_err();
        assert!(matches!(err, PipelineError::BadInstancePath { .. }));
    }
}
