//! Row-block partitioning of a square matrix across a worker group.

use std::ops::Range;

/// A contiguous block of matrix rows owned by one worker.
///
/// Blocks are uniform: every rank gets `n / workers` rows, and the blocks
/// tile `[0, n)` with no gap or overlap. The divisibility of `n` by the
/// worker count is validated before any phase runs (see [`crate::config`]);
/// this type assumes it.
///
/// # Example
///
/// ```
/// use transbench::RowBlock;
///
/// let block = RowBlock::for_rank(8, 1, 4);
/// assert_eq!(block.start_row, 2);
/// assert_eq!(block.row_count, 2);
/// assert_eq!(block.rows(), 2..4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    /// First global row of the block.
    pub start_row: usize,
    /// Number of rows in the block, `n / workers`.
    pub row_count: usize,
}

impl RowBlock {
    /// Block for `rank` in a group of `workers` over an n×n matrix.
    ///
    /// Same formula on every rank; only `rank` differs, which is what
    /// makes the partition consistent without any cross-worker exchange.
    pub fn for_rank(n: usize, rank: usize, workers: usize) -> RowBlock {
        let row_count = n / workers;
        RowBlock {
            start_row: rank * row_count,
            row_count,
        }
    }

    /// Global row range covered by this block.
    pub fn rows(&self) -> Range<usize> {
        self.start_row..self.start_row + self.row_count
    }

    /// Length of this block's flat wire buffer for an n-column matrix.
    pub fn flat_len(&self, n: usize) -> usize {
        self.row_count * n
    }
}
