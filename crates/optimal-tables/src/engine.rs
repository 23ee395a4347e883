//! Breadth-first traversal from the canonical start over an implicit graph.
//!
//! The engine borrows a codec and a move set describing the same domain,
//! allocates the distance table, and fills it in one pass. The FIFO queue
//! holds states in non-decreasing distance order, so the first distance
//! recorded for a state is its shortest one.

use std::collections::VecDeque;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::codec::StateCodec;
use crate::error::{Error, Result};
use crate::moves::MoveSet;
use crate::table::DistanceTable;

/// Receives `(states_processed, total_states)` after every expansion.
pub trait ProgressSink {
    fn report(&mut self, processed: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressSink for F {
    fn report(&mut self, processed: usize, total: usize) {
        self(processed, total)
    }
}

/// Discards progress notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _processed: usize, _total: usize) {}
}

/// Logs percentage of the state space processed every `interval` states.
#[derive(Debug, Clone, Copy)]
pub struct TracingProgress {
    interval: usize,
}

impl TracingProgress {
    /// An interval of 0 disables reporting.
    pub fn every(interval: usize) -> Self {
        Self { interval }
    }
}

impl Default for TracingProgress {
    fn default() -> Self {
        Self::every(10_000)
    }
}

impl ProgressSink for TracingProgress {
    fn report(&mut self, processed: usize, total: usize) {
        if self.interval == 0 || processed % self.interval != 0 {
            return;
        }
        let percent = processed as f64 / total.max(1) as f64 * 100.0;
        info!(processed, total, "{percent:.2} % done...");
    }
}

/// Counters collected during a traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraversalStats {
    /// States dequeued and expanded
    pub states_expanded: usize,
    /// Move applications that left the domain
    pub rejected_moves: usize,
    /// States given a distance, start included
    pub reached: usize,
    pub max_distance: i32,
    pub time_elapsed_ms: u64,
}

/// A completed traversal: the full table plus its counters.
#[derive(Debug, Clone)]
pub struct Traversal {
    pub table: DistanceTable,
    pub stats: TraversalStats,
}

/// BFS over the graph induced by `moves` on the domain of `codec`.
#[derive(Debug)]
pub struct BfsEngine<'a, C, M> {
    codec: &'a C,
    moves: &'a M,
}

impl<'a, C, M> BfsEngine<'a, C, M>
where
    C: StateCodec,
    M: MoveSet<State = C::State, Bounds = C::Bounds>,
{
    /// Check that codec and move set agree on the domain before any traversal.
    pub fn new(codec: &'a C, moves: &'a M) -> Result<Self> {
        if codec.bounds() != moves.bounds() {
            return Err(Error::BoundsMismatch {
                codec: format!("{:?}", codec.bounds()),
                moves: format!("{:?}", moves.bounds()),
            });
        }
        let start = codec.start();
        if !codec.contains(start) {
            return Err(Error::StartOutOfDomain(format!("{start:?}")));
        }
        Ok(Self { codec, moves })
    }

    /// Compute the distance of every state from the canonical start.
    ///
    /// The returned table is complete: states not reachable from the start
    /// keep the unreached sentinel.
    pub fn run<P: ProgressSink>(&self, progress: &mut P) -> Result<Traversal> {
        let start_time = Instant::now();
        let total = self.codec.state_count();
        let mut table =
            DistanceTable::try_new(total).ok_or(Error::Allocation { states: total })?;
        let mut stats = TraversalStats::default();

        debug!(states = total, moves = self.moves.len(), "starting traversal");

        let start = self.codec.start();
        if !table.record(self.codec.encode(start), 0) {
            return Err(Error::StartOutOfDomain(format!("{start:?}")));
        }
        stats.reached = 1;

        let mut queue: VecDeque<(C::State, i32)> = VecDeque::new();
        queue.push_back((start, 0));

        while let Some((state, dist)) = queue.pop_front() {
            stats.states_expanded += 1;
            stats.max_distance = stats.max_distance.max(dist);
            let next_dist = dist.checked_add(1).ok_or(Error::DistanceOverflow(dist))?;

            for index in 0..self.moves.len() {
                let Some(candidate) = self.moves.apply(index, state) else {
                    stats.rejected_moves += 1;
                    continue;
                };
                // Already discovered at an equal or shorter distance.
                if !table.record(self.codec.encode(candidate), next_dist) {
                    continue;
                }
                stats.reached += 1;
                queue.push_back((candidate, next_dist));
            }

            progress.report(stats.states_expanded, total);
        }

        stats.time_elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            reached = stats.reached,
            total,
            max_distance = stats.max_distance,
            elapsed_ms = stats.time_elapsed_ms,
            "traversal complete"
        );

        Ok(Traversal { table, stats })
    }
}
