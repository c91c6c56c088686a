//! Serial transpose and element-wise transpose verification.

use crate::matrix::Matrix;

/// Transpose a matrix: returns `m^T` as a new matrix.
///
/// Row-major in, row-major out; what was column j of the input becomes
/// row j of the output.
///
/// # Example
///
/// ```
/// use transbench::matrix::{transpose::transpose, Matrix};
///
/// let m = Matrix::from_flat(2, vec![1.0, 2.0,
///                                   3.0, 4.0]);
/// let t = transpose(&m);
/// assert_eq!(t.as_slice(), &[1.0, 3.0,
///                            2.0, 4.0]);
/// ```
pub fn transpose(m: &Matrix) -> Matrix {
    let n = m.n();
    let mut out = vec![0.0f32; n * n];
    for i in 0..n {
        for j in 0..n {
            out[i * n + j] = m.get(j, i);
        }
    }
    Matrix::from_flat(n, out)
}

/// True iff `result` is exactly the transpose of `original`, i.e.
/// `result[i][j] == original[j][i]` for all i, j.
///
/// Used by the driver to validate both the serial and the gathered
/// parallel transpose against the input; exact `f32` equality.
pub fn verify_transpose(original: &Matrix, result: &Matrix) -> bool {
    let n = original.n();
    if result.n() != n {
        return false;
    }
    let mut check = true;
    for i in 0..n {
        for j in 0..n {
            if result.get(i, j) != original.get(j, i) {
                check = false;
            }
        }
    }
    check
}
