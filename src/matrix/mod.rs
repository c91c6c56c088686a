//! The square matrix type and its serial reference operations.
//!
//! Serial symmetry and transpose live here and serve double duty: as the
//! correctness oracle for the parallel phases, and as the elapsed-time
//! denominator for speedup.

pub mod symmetry;
pub mod transpose;

use std::fmt;

use rand::Rng;

/// A square n×n matrix of `f32`, stored row-major in one flat buffer.
///
/// The buffer is never mutated on the benchmark path: transposition always
/// produces a new `Matrix`, and the parallel phases only read it.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    n: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Wrap a flat row-major buffer as an n×n matrix.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != n * n`.
    pub fn from_flat(n: usize, data: Vec<f32>) -> Matrix {
        assert_eq!(data.len(), n * n, "expected {}x{}={} elements", n, n, n * n);
        Matrix { n, data }
    }

    /// n×n matrix of uniform random values in [0, 10).
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Matrix {
        let data = (0..n * n).map(|_| rng.gen_range(0.0f32..10.0)).collect();
        Matrix { n, data }
    }

    /// Matrix dimension.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Element at row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    /// The flat row-major buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mirror the lower triangle into the upper triangle, making the
    /// matrix symmetric in place. Used to build inputs for the symmetric
    /// test path; the benchmark itself never mutates its input.
    pub fn symmetrize(&mut self) {
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                self.data[i * self.n + j] = self.data[j * self.n + i];
            }
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            for j in 0..self.n {
                write!(f, "{:10.4} ", self.get(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
