//! Run validation, applied before any worker-group phase starts.

use crate::error::Error;

/// Validate a (matrix size, worker count) pair.
///
/// The dimension must be a positive power of two and divisible by the
/// worker count, so that row blocks come out uniform. Rejection happens
/// here, once, before any buffer is allocated or any worker spawned; the
/// partitioner itself performs no checks.
///
/// # Example
///
/// ```
/// use transbench::config::validate;
///
/// assert!(validate(16, 4).is_ok());
/// assert!(validate(6, 2).is_err());
/// assert!(validate(16, 3).is_err());
/// ```
pub fn validate(n: usize, workers: usize) -> Result<(), Error> {
    if n == 0 || n & (n - 1) != 0 {
        return Err(Error::NotPowerOfTwo { n });
    }
    if workers == 0 || n % workers != 0 {
        return Err(Error::NotDivisible { n, workers });
    }
    Ok(())
}
