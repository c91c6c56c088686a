//! Collective communication across a fixed worker group.
//!
//! The benchmark is single-program-multiple-data: every worker runs the
//! same phase code and only diverges on its rank. All cross-worker
//! synchronization happens at two blocking collectives — an AND-reduction
//! for the symmetry check and a gather for the transpose. Outside those,
//! workers share nothing mutable.
//!
//! Group bootstrap is an external concern; the phases only ever see a
//! [`Communicator`], which hands them a (rank, size) pair and the two
//! collectives. [`local::run_group`] provides the in-process group used by
//! the driver and the tests.

pub mod local;

use crate::error::Error;

/// Rank of the coordinator, the sole owner of full-size results and of
/// the reporting path.
pub const COORDINATOR: usize = 0;

/// One worker's handle into the group.
///
/// Both collectives block until every rank has arrived; a worker that
/// never reaches its collective stalls the group (batch-job semantics, no
/// timeout). Results are delivered to the coordinator only — every other
/// rank gets `None`, an explicitly unused value rather than garbage.
pub trait Communicator {
    /// This worker's zero-based rank.
    fn rank(&self) -> usize;

    /// Number of workers in the group.
    fn size(&self) -> usize;

    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR
    }

    /// Logical-AND reduction of every rank's `local` flag.
    ///
    /// Returns `Some(global)` on the coordinator, `None` elsewhere.
    fn reduce_and(&self, local: bool) -> Result<Option<bool>, Error>;

    /// Gather equal-sized blocks from every rank, concatenated in
    /// ascending rank order.
    ///
    /// Returns `Some(buffer)` of `size() * local.len()` elements on the
    /// coordinator, `None` elsewhere.
    fn gather(&self, local: &[f32]) -> Result<Option<Vec<f32>>, Error>;

    /// Broadcast a fatal fault to every other rank.
    ///
    /// Ranks blocked in (or later entering) a collective observe it as
    /// [`Error::Fault`]. The caller is expected to return its own error
    /// right after; there is no recovery from a partial group.
    fn abort(&self, reason: &str);
}
