//! Distributed-memory matrix transpose and symmetry benchmark.
//!
//! Two operations — symmetry verification and transposition of a square
//! `f32` matrix — each implemented twice: once serially as a correctness
//! oracle and speedup baseline, and once partitioned by contiguous row
//! blocks across a fixed group of cooperating workers. The symmetry check
//! combines per-rank results with a logical-AND reduction; the transpose
//! gathers per-rank blocks back to the coordinator. Wall-clock timing
//! around the phases yields bandwidth, speedup, and efficiency.
//!
//! ## Usage
//!
//! ```
//! use transbench::{transpose_parallel, Matrix};
//!
//! let m = Matrix::from_flat(4, (1..=16).map(|v| v as f32).collect());
//! let out = transpose_parallel(&m, 2).unwrap();
//!
//! assert_eq!(out.matrix.get(0, 1), 5.0);
//! assert_eq!(out.matrix.get(3, 0), 4.0);
//! ```
//!
//! ## What's inside
//!
//! - Uniform row-block partitioning, identical formula on every rank
//! - An in-process SPMD worker group with blocking collectives
//! - Serial baselines used as the oracle for both parallel phases
//! - Bandwidth / speedup / efficiency metrics with an append-only log

pub mod comm;
pub mod config;
pub mod error;
pub mod matrix;
pub mod metrics;
pub mod parallel;
pub mod partition;

pub use error::Error;
pub use matrix::Matrix;
pub use metrics::{MetricsRecord, PhaseTiming};
pub use parallel::{SymmetryOutcome, TransposeOutcome};
pub use partition::RowBlock;

use comm::local::run_group;

/// Parallel symmetry check over an in-process worker group.
///
/// Validates the (n, workers) pair, spawns the group, runs
/// [`parallel::check_symmetry`] on every rank, and returns the
/// coordinator's outcome.
pub fn check_symmetric_parallel(matrix: &Matrix, workers: usize) -> Result<SymmetryOutcome, Error> {
    config::validate(matrix.n(), workers)?;
    let mut results = run_group(workers, |comm| parallel::check_symmetry(&comm, matrix))?;
    coordinator_outcome(results.swap_remove(comm::COORDINATOR))
}

/// Parallel transpose over an in-process worker group.
///
/// Validates the (n, workers) pair, spawns the group, runs
/// [`parallel::transpose`] on every rank, and returns the coordinator's
/// gathered matrix plus timing.
pub fn transpose_parallel(matrix: &Matrix, workers: usize) -> Result<TransposeOutcome, Error> {
    config::validate(matrix.n(), workers)?;
    let mut results = run_group(workers, |comm| parallel::transpose(&comm, matrix))?;
    coordinator_outcome(results.swap_remove(comm::COORDINATOR))
}

fn coordinator_outcome<T>(result: Option<T>) -> Result<T, Error> {
    result.ok_or_else(|| Error::Fault {
        rank: comm::COORDINATOR,
        reason: "coordinator produced no result".into(),
    })
}
