//! Distributed symmetry check: local upper-triangular scan + AND-reduction.

use std::time::{Duration, Instant};

use crate::comm::Communicator;
use crate::error::Error;
use crate::matrix::Matrix;
use crate::partition::RowBlock;

/// Coordinator-side result of the parallel symmetry check.
#[derive(Debug, Clone, Copy)]
pub struct SymmetryOutcome {
    pub symmetric: bool,
    /// Wall-clock for scan + reduction, measured on the coordinator.
    pub elapsed: Duration,
}

/// Check matrix symmetry across the worker group.
///
/// Each rank scans the strictly-upper-triangular cells of its own row
/// block — row `i` in the block, columns `(i, n)` — and compares each cell
/// to its mirror with exact `f32` equality. The rank union covers the full
/// upper triangle exactly once, so the AND-reduction of the local flags
/// equals the serial scan. Blocks near the bottom of the matrix see short
/// or empty inner ranges; no special-casing is needed.
///
/// Returns `Some(outcome)` on the coordinator, `None` on every other rank.
pub fn check_symmetry<C: Communicator>(
    comm: &C,
    matrix: &Matrix,
) -> Result<Option<SymmetryOutcome>, Error> {
    let n = matrix.n();
    // Every rank samples the clock, but only the coordinator's sample
    // survives into the outcome.
    let start = Instant::now();

    let block = RowBlock::for_rank(n, comm.rank(), comm.size());
    let mut local_check = true;
    for i in block.rows() {
        for j in (i + 1)..n {
            if matrix.get(i, j) != matrix.get(j, i) {
                local_check = false;
            }
        }
    }

    let global = comm.reduce_and(local_check)?;
    Ok(global.map(|symmetric| SymmetryOutcome {
        symmetric,
        elapsed: start.elapsed(),
    }))
}
