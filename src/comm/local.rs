//! In-process worker group: one OS thread per rank over a full mesh of
//! mpsc channels.
//!
//! Each rank owns its inbox and a sender to every peer. Collectives are
//! implemented root-side: non-coordinators send their contribution to
//! rank 0 and return immediately with `None`; the coordinator blocks until
//! it has heard from every rank. That gives the same blocking semantics as
//! a process-group collective while keeping every buffer exclusively
//! owned — the only shared state is the read-only input borrowed by the
//! phase closure.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::comm::{Communicator, COORDINATOR};
use crate::error::Error;

enum Packet {
    ReduceAnd { value: bool },
    Block { rank: usize, data: Vec<f32> },
    Fault { rank: usize, reason: String },
}

/// One worker's endpoint in an in-process group.
pub struct LocalComm {
    rank: usize,
    size: usize,
    // Indexed by rank; a rank's own slot is None so its inbox closes once
    // every peer is gone, instead of deadlocking a collective.
    peers: Vec<Option<Sender<Packet>>>,
    inbox: Receiver<Packet>,
    // Packets from ranks that have already raced ahead into the next
    // collective, stashed until the coordinator catches up.
    stash: RefCell<VecDeque<Packet>>,
}

impl LocalComm {
    fn new(rank: usize, peers: Vec<Sender<Packet>>, inbox: Receiver<Packet>) -> LocalComm {
        let size = peers.len();
        let peers = peers
            .into_iter()
            .enumerate()
            .map(|(r, tx)| (r != rank).then_some(tx))
            .collect();
        LocalComm {
            rank,
            size,
            peers,
            inbox,
            stash: RefCell::new(VecDeque::new()),
        }
    }

    fn send_to_coordinator(&self, packet: Packet) -> Result<(), Error> {
        let Some(tx) = &self.peers[COORDINATOR] else {
            // The coordinator never messages itself.
            return Ok(());
        };
        tx.send(packet).map_err(|_| Error::Fault {
            rank: COORDINATOR,
            reason: "coordinator is gone".into(),
        })
    }

    /// Next packet for the current collective, preferring stashed ones.
    fn recv(&self) -> Result<Packet, Error> {
        if let Some(packet) = self.stash.borrow_mut().pop_front() {
            return Ok(packet);
        }
        self.inbox.recv().map_err(|_| Error::Fault {
            rank: self.rank,
            reason: "a worker disconnected before reaching its collective".into(),
        })
    }
}

impl Communicator for LocalComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn reduce_and(&self, local: bool) -> Result<Option<bool>, Error> {
        if !self.is_coordinator() {
            self.send_to_coordinator(Packet::ReduceAnd { value: local })?;
            return Ok(None);
        }
        let mut global = local;
        let mut pending = self.size - 1;
        while pending > 0 {
            match self.recv()? {
                Packet::ReduceAnd { value } => {
                    global &= value;
                    pending -= 1;
                }
                Packet::Fault { rank, reason } => return Err(Error::Fault { rank, reason }),
                // A gather block from a rank already past this reduction.
                other @ Packet::Block { .. } => self.stash.borrow_mut().push_back(other),
            }
        }
        Ok(Some(global))
    }

    fn gather(&self, local: &[f32]) -> Result<Option<Vec<f32>>, Error> {
        if !self.is_coordinator() {
            self.send_to_coordinator(Packet::Block {
                rank: self.rank,
                data: local.to_vec(),
            })?;
            return Ok(None);
        }

        let block_len = local.len();
        let mut buffer: Vec<f32> = Vec::new();
        if buffer.try_reserve_exact(block_len * self.size).is_err() {
            self.abort("gather destination allocation failed");
            return Err(Error::Allocation { rank: self.rank });
        }
        buffer.resize(block_len * self.size, 0.0);
        buffer[..block_len].copy_from_slice(local);

        let mut pending = self.size - 1;
        while pending > 0 {
            match self.recv()? {
                Packet::Block { rank, data } => {
                    if data.len() != block_len {
                        return Err(Error::Fault {
                            rank,
                            reason: format!(
                                "gather block size mismatch: got {}, expected {}",
                                data.len(),
                                block_len
                            ),
                        });
                    }
                    buffer[rank * block_len..(rank + 1) * block_len].copy_from_slice(&data);
                    pending -= 1;
                }
                Packet::Fault { rank, reason } => return Err(Error::Fault { rank, reason }),
                other @ Packet::ReduceAnd { .. } => self.stash.borrow_mut().push_back(other),
            }
        }
        Ok(Some(buffer))
    }

    fn abort(&self, reason: &str) {
        for tx in self.peers.iter().flatten() {
            // A peer that already exited is fine; everyone else sees the fault.
            let _ = tx.send(Packet::Fault {
                rank: self.rank,
                reason: reason.to_string(),
            });
        }
    }
}

/// Run `f` as an SPMD program over `workers` in-process ranks.
///
/// Spawns one thread per rank, hands each its [`LocalComm`], joins the
/// whole group, and returns the per-rank results in rank order. The first
/// failing rank's error wins; a panicking worker is reported as an
/// [`Error::Fault`] rather than poisoning the caller.
///
/// # Example
///
/// ```
/// use transbench::comm::{local::run_group, Communicator};
///
/// let ranks = run_group(4, |comm| Ok(comm.rank())).unwrap();
/// assert_eq!(ranks, vec![0, 1, 2, 3]);
/// ```
pub fn run_group<T, F>(workers: usize, f: F) -> Result<Vec<T>, Error>
where
    F: Fn(LocalComm) -> Result<T, Error> + Sync,
    T: Send,
{
    assert!(workers > 0, "worker group must not be empty");

    let mut senders = Vec::with_capacity(workers);
    let mut inboxes = Vec::with_capacity(workers);
    for _ in 0..workers {
        let (tx, rx) = mpsc::channel();
        senders.push(tx);
        inboxes.push(rx);
    }

    let results: Vec<Result<T, Error>> = thread::scope(|s| {
        let handles: Vec<_> = inboxes
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| {
                let peers = senders.clone();
                let f = &f;
                s.spawn(move || f(LocalComm::new(rank, peers, inbox)))
            })
            .collect();
        // Workers hold the only senders from here on.
        drop(senders);
        handles
            .into_iter()
            .enumerate()
            .map(|(rank, handle)| {
                handle.join().unwrap_or_else(|_| {
                    Err(Error::Fault {
                        rank,
                        reason: "worker panicked".into(),
                    })
                })
            })
            .collect()
    });

    results.into_iter().collect()
}
