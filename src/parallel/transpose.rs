//! Distributed transpose: local column-walk + gather to the coordinator.

use std::time::Instant;

use crate::comm::Communicator;
use crate::error::Error;
use crate::matrix::Matrix;
use crate::metrics::PhaseTiming;
use crate::partition::RowBlock;

/// Coordinator-side result of the parallel transpose.
#[derive(Debug, Clone)]
pub struct TransposeOutcome {
    pub matrix: Matrix,
    pub timing: PhaseTiming,
}

/// Transpose the matrix across the worker group.
///
/// Each rank produces the row block of the *output* matching its
/// [`RowBlock`]: `local[i * n + j] = matrix[j][start_row + i]`, the
/// transpose relation applied per assigned output row, written into one
/// flat wire buffer. The gather concatenates the buffers in rank order on
/// the coordinator, and since rank order equals row-block order the flat
/// result *is* the transposed matrix.
///
/// The compute window covers only the local column-walk; the total window
/// adds buffer allocation and the gather. A rank that cannot allocate its
/// wire buffer broadcasts a fault and fails the whole group — transposition
/// needs every block present.
///
/// Returns `Some(outcome)` on the coordinator, `None` on every other rank.
pub fn transpose<C: Communicator>(
    comm: &C,
    matrix: &Matrix,
) -> Result<Option<TransposeOutcome>, Error> {
    let n = matrix.n();
    let total_start = Instant::now();

    let block = RowBlock::for_rank(n, comm.rank(), comm.size());
    let mut local: Vec<f32> = Vec::new();
    if local.try_reserve_exact(block.flat_len(n)).is_err() {
        comm.abort("local transpose buffer allocation failed");
        return Err(Error::Allocation { rank: comm.rank() });
    }

    let compute_start = Instant::now();
    for i in 0..block.row_count {
        for j in 0..n {
            local.push(matrix.get(j, block.start_row + i));
        }
    }
    let compute = compute_start.elapsed();

    let gathered = comm.gather(&local)?;
    Ok(gathered.map(|buffer| TransposeOutcome {
        matrix: Matrix::from_flat(n, buffer),
        timing: PhaseTiming {
            compute,
            total: total_start.elapsed(),
        },
    }))
}
