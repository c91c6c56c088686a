//! Row-partitioned parallel phases.
//!
//! Both phases follow the same shape: partition the matrix into uniform
//! row blocks, compute locally on the assigned block, combine through one
//! blocking collective. Symmetry combines with an AND-reduction; transpose
//! combines with a gather. Timing is taken on the coordinator and spans
//! the whole phase; the transpose additionally isolates a compute-only
//! window that excludes buffer allocation and the gather.

pub mod symmetry;
pub mod transpose;

pub use symmetry::{check_symmetry, SymmetryOutcome};
pub use transpose::{transpose, TransposeOutcome};
