//! Serial symmetry check.

use crate::matrix::Matrix;

/// Full upper-triangular scan: true iff `m[i][j] == m[j][i]` for every
/// pair above the diagonal.
///
/// Comparison is exact `f32` equality, no epsilon. The point of the check
/// is to catch transposition and indexing bugs bit-for-bit, not to
/// tolerate numeric drift.
///
/// # Example
///
/// ```
/// use transbench::matrix::{symmetry::is_symmetric, Matrix};
///
/// let m = Matrix::from_flat(2, vec![1.0, 3.0, 3.0, 2.0]);
/// assert!(is_symmetric(&m));
///
/// let m = Matrix::from_flat(2, vec![1.0, 3.0, 4.0, 2.0]);
/// assert!(!is_symmetric(&m));
/// ```
pub fn is_symmetric(m: &Matrix) -> bool {
    let n = m.n();
    let mut check = true;
    for i in 0..n {
        for j in (i + 1)..n {
            if m.get(i, j) != m.get(j, i) {
                check = false;
            }
        }
    }
    check
}
