//! Error taxonomy for the benchmark.
//!
//! Three classes matter at runtime: configuration errors reject the run
//! before any phase starts (exit 1), allocation and group faults kill the
//! whole worker group (exit 2), and a missing results log is reported but
//! never fatal.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The matrix dimension must be a positive power of two.
    #[error("matrix size {n} is not a positive power of two")]
    NotPowerOfTwo { n: usize },

    /// Row blocks are uniform, so the worker count must divide n.
    #[error("matrix size {n} is not divisible by {workers} workers")]
    NotDivisible { n: usize, workers: usize },

    /// A worker could not allocate its local or result buffer. Partial
    /// results are meaningless, so this takes the whole group down.
    #[error("buffer allocation failed on rank {rank}")]
    Allocation { rank: usize },

    /// Another worker broadcast a fatal fault, or a worker died without
    /// reaching its collective.
    #[error("worker group fault from rank {rank}: {reason}")]
    Fault { rank: usize, reason: String },

    /// The results log could not be opened or written. Metrics for this
    /// run are lost; the run itself is unaffected.
    #[error("results log unavailable: {0}")]
    Sink(#[from] io::Error),
}

impl Error {
    /// True for the configuration class, which maps to exit code 1.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::NotPowerOfTwo { .. } | Error::NotDivisible { .. })
    }
}
