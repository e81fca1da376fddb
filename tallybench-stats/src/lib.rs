#![warn(missing_docs)]
//! Tallybench Statistical Engine
//!
//! Central tendency and dispersion per instance, plus baseline-relative
//! speedups:
//! - Arithmetic mean and sample standard deviation (Bessel's correction)
//! - Relative standard deviation as a percentage, flagged when undefined
//! - Instance-wise speedup against the baseline with strict key alignment
//! - Second-order aggregates over the speedup values themselves
//!
//! All values are kept at full precision; rounding happens only at the
//! presentation boundary in `tallybench-report`.

mod aggregate;
mod speedup;
mod summary;

pub use aggregate::{aggregate_speedups, SpeedupAggregate};
pub use speedup::{compute_speedups, SpeedupValue};
pub use summary::{compute_stats, RuntimeStats, StatsTable};
