//! Cumulative dispatcher counters.
//!
//! The dispatcher carries no logging; these atomics are its
//! observability surface, and tests use them to verify mechanics that
//! outcomes alone cannot show (e.g. "the region check short-circuited
//! before any search was spawned").

use std::sync::atomic::{AtomicU64, Ordering};

/// Internal atomic counters shared between the dispatcher and its
/// worker-completion callbacks.
#[derive(Debug, Default)]
pub(crate) struct DispatchMetrics {
    pub goal_unwalkable_rejections: AtomicU64,
    pub region_rejections: AtomicU64,
    pub adjacency_hits: AtomicU64,
    pub naive_walk_hits: AtomicU64,
    pub naive_walk_misses: AtomicU64,
    pub searches_submitted: AtomicU64,
    pub searches_completed: AtomicU64,
    pub searches_discarded: AtomicU64,
    pub results_delivered: AtomicU64,
}

impl DispatchMetrics {
    pub(crate) fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            goal_unwalkable_rejections: self.goal_unwalkable_rejections.load(Ordering::Relaxed),
            region_rejections: self.region_rejections.load(Ordering::Relaxed),
            adjacency_hits: self.adjacency_hits.load(Ordering::Relaxed),
            naive_walk_hits: self.naive_walk_hits.load(Ordering::Relaxed),
            naive_walk_misses: self.naive_walk_misses.load(Ordering::Relaxed),
            searches_submitted: self.searches_submitted.load(Ordering::Relaxed),
            searches_completed: self.searches_completed.load(Ordering::Relaxed),
            searches_discarded: self.searches_discarded.load(Ordering::Relaxed),
            results_delivered: self.results_delivered.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the dispatcher's cumulative counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Queries rejected because the goal tile was not walkable.
    pub goal_unwalkable_rejections: u64,
    /// Queries rejected by the region-connectivity index without a search.
    pub region_rejections: u64,
    /// Queries resolved by the trivial-adjacency fast path.
    pub adjacency_hits: u64,
    /// Queries resolved by the naive greedy walk.
    pub naive_walk_hits: u64,
    /// Naive-walk attempts abandoned partway (query fell through to a search).
    pub naive_walk_misses: u64,
    /// Searches handed to the worker pool.
    pub searches_submitted: u64,
    /// Worker completions whose result was recorded.
    pub searches_completed: u64,
    /// Worker completions discarded because the request was cancelled
    /// or superseded before they finished.
    pub searches_discarded: u64,
    /// Finished results handed back to a polling caller.
    pub results_delivered: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_zero() {
        assert_eq!(DispatchMetrics::default().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn snapshot_reflects_counters() {
        let metrics = DispatchMetrics::default();
        metrics.adjacency_hits.fetch_add(3, Ordering::Relaxed);
        metrics.searches_submitted.fetch_add(1, Ordering::Relaxed);
        let snap = metrics.snapshot();
        assert_eq!(snap.adjacency_hits, 3);
        assert_eq!(snap.searches_submitted, 1);
        assert_eq!(snap.region_rejections, 0);
    }
}
