//! Min-priority frontier with decrease-key-by-reinsertion.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use warren_core::Coord;

/// One queued expansion candidate.
///
/// `priority` is the f-score (cumulative cost plus heuristic estimate);
/// `cost` is the cumulative cost recorded at push time, kept so a pop
/// can be recognized as stale against the visited map.
#[derive(Clone, Copy, Debug)]
pub struct FrontierEntry {
    /// The queued coordinate.
    pub coord: Coord,
    /// f-score at push time.
    pub priority: f64,
    /// Cumulative path cost at push time.
    pub cost: f64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest
        // f-score on top. total_cmp gives a total order over f64.
        other.priority.total_cmp(&self.priority)
    }
}

/// The priority queue of coordinates awaiting expansion.
///
/// Decrease-key is performed by reinsertion: the same coordinate may be
/// queued several times with different priorities. A popped entry whose
/// recorded cost is worse than the visited map's best is a redundant
/// expansion the caller skips, never a correctness violation.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
}

impl Frontier {
    /// An empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `coord` with the given f-score and cumulative cost.
    pub fn push(&mut self, coord: Coord, priority: f64, cost: f64) {
        self.heap.push(FrontierEntry {
            coord,
            priority,
            cost,
        });
    }

    /// Remove and return the entry with the smallest f-score.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Whether no entries are queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Re-prioritize every queued entry.
    ///
    /// Used when a multi-goal search moves on to its next goal: the
    /// heuristic component of each f-score must be recomputed against
    /// the new goal. `reprioritize` maps a queued coordinate to its new
    /// `(priority, cost)` pair.
    pub fn reweight(&mut self, mut reprioritize: impl FnMut(Coord) -> (f64, f64)) {
        let old = std::mem::take(&mut self.heap);
        for entry in old {
            let (priority, cost) = reprioritize(entry.coord);
            self.heap.push(FrontierEntry {
                coord: entry.coord,
                priority,
                cost,
            });
        }
    }
}
