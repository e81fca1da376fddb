#![warn(missing_docs)]
//! Tallybench Core - Input Model and Merging
//!
//! This crate provides the input side of the aggregation pipeline:
//! - Run matrix configuration (which hardware/variant combinations exist,
//!   which variant is the baseline, how many repetitions were recorded)
//! - CSV run-record loading with instance-key derivation
//! - Keyed merging of per-repetition tables into one series per instance

mod error;
mod matrix;
mod merge;
mod reader;
mod record;

pub use error::PipelineError;
pub use matrix::{Combination, RunMatrix, DEFAULT_REPETITIONS};
pub use merge::{merge_repetitions, InstanceSeries, MergedSeries};
pub use reader::{read_run_file, RunTable};
pub use record::{derive_instance_key, RunMeta, RunRecord};
