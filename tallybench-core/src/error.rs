//! Pipeline error taxonomy.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while loading and joining run results.
///
/// Every error is local to one (hardware, variant) combination. The pipeline
/// collects failures per combination and keeps processing the independent
/// ones rather than aborting at the first problem.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// An expected per-repetition input file is absent.
    #[error("missing input file: {path}")]
    MissingFile {
        /// Path that was expected to exist.
        path: PathBuf,
    },

    /// A row could not be parsed into a run record.
    #[error("{path}, row {row}: {message}")]
    MalformedRow {
        /// File the row came from.
        path: PathBuf,
        /// 1-based data row index (header excluded).
        row: usize,
        /// What was wrong with the row.
        message: String,
    },

    /// The raw `file` column does not start with the configured prefix.
    #[error("{file:?} does not start with the configured instance prefix {prefix:?}")]
    PrefixMismatch {
        /// Raw value of the `file` column.
        file: String,
        /// Prefix that was expected.
        prefix: String,
    },

    /// The raw `file` column has no usable file name component.
    #[error("cannot derive an instance key from {file:?}")]
    BadInstancePath {
        /// Raw value of the `file` column.
        file: String,
    },

    /// The same instance key appeared twice within one repetition file.
    #[error("{path}, row {row}: duplicate instance key {key:?}")]
    DuplicateInstance {
        /// File the duplicate came from.
        path: PathBuf,
        /// 1-based data row index of the second occurrence.
        row: usize,
        /// The duplicated key.
        key: String,
    },

    /// Instance key sets disagree where they must be identical.
    ///
    /// Raised when computing speedups: baseline and treatment must cover the
    /// exact same instances. Never resolved by positional truncation.
    #[error(
        "instance keys misaligned between {left} and {right}: \
         missing from {left}: {missing_left:?}, missing from {right}: {missing_right:?}"
    )]
    Alignment {
        /// Label of the left-hand (baseline) side.
        left: String,
        /// Label of the right-hand (treatment) side.
        right: String,
        /// Keys present on the right but absent from the left.
        missing_left: Vec<String>,
        /// Keys present on the left but absent from the right.
        missing_right: Vec<String>,
    },
}
