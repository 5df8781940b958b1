//! The public-facing dispatcher: tiered query resolution, the
//! outstanding-request table, and completion merging.

use std::sync::{Arc, Mutex, MutexGuard};

use indexmap::IndexMap;

use warren_core::{Coord, PathResult, RegionIndex, RequesterId, WorldGrid};
use warren_search::CancelToken;

use crate::config::{ConfigError, EngineConfig};
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::pool::{SearchJob, SearchPool};

/// State of one outstanding request.
#[derive(Debug)]
enum JobState {
    /// A worker is (or will shortly be) searching.
    Running,
    /// The search finished; an empty path means no connection.
    Finished(Vec<Coord>),
}

/// Dispatcher-owned record of one outstanding or completed request.
#[derive(Debug)]
struct QueryRecord {
    start: Coord,
    goal: Coord,
    ignore_no_pass: bool,
    /// Monotonic ticket; a completion only lands if the live record
    /// still carries the ticket the job was submitted with.
    ticket: u64,
    cancel: CancelToken,
    state: JobState,
}

/// Shared between the dispatcher and pool-thread completion callbacks.
/// One mutex guards both the in-flight markers and the result slots.
struct DispatchShared {
    jobs: Mutex<IndexMap<RequesterId, QueryRecord>>,
    metrics: DispatchMetrics,
}

impl DispatchShared {
    fn jobs(&self) -> MutexGuard<'_, IndexMap<RequesterId, QueryRecord>> {
        self.jobs.lock().expect("dispatcher job table lock poisoned")
    }
}

/// Asynchronous path-query façade over a worker pool.
///
/// `request()` never blocks: a query either resolves synchronously
/// through a fast path or returns [`PathResult::Running`] while a
/// pool worker searches in the background. Callers poll by calling
/// `request()` again with the same id once per simulation tick.
///
/// The dispatcher is called from a single simulation thread but is
/// safe against pool completions arriving from any worker thread.
///
/// # Precondition
///
/// The world must not be mutated while searches are in flight; see
/// [`WorldGrid`]. Results computed against a world that changed
/// mid-search may be stale.
pub struct Dispatcher {
    world: Arc<dyn WorldGrid>,
    regions: Arc<dyn RegionIndex>,
    shared: Arc<DispatchShared>,
    pool: SearchPool,
    naive_walk_radius_sq: i64,
    next_ticket: std::sync::atomic::AtomicU64,
}

impl Dispatcher {
    /// Construct a dispatcher and spawn its worker pool.
    pub fn new(
        world: Arc<dyn WorldGrid>,
        regions: Arc<dyn RegionIndex>,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let shared = Arc::new(DispatchShared {
            jobs: Mutex::new(IndexMap::new()),
            metrics: DispatchMetrics::default(),
        });

        let callback_shared = Arc::clone(&shared);
        let on_done = Arc::new(move |job: &SearchJob, path: Vec<Coord>| {
            let mut jobs = callback_shared.jobs();
            match jobs.get_mut(&job.id) {
                Some(record) if record.ticket == job.ticket => {
                    record.state = JobState::Finished(path);
                    callback_shared
                        .metrics
                        .searches_completed
                        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
                // Record gone (cancelled) or replaced by a newer
                // request for the same id: drop the result.
                _ => {
                    callback_shared
                        .metrics
                        .searches_discarded
                        .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                }
            }
        });

        let pool = SearchPool::spawn(
            Arc::clone(&world),
            config.resolved_worker_count(),
            config.heuristic,
            on_done,
        )?;

        Ok(Self {
            world,
            regions,
            shared,
            pool,
            naive_walk_radius_sq: config.naive_walk_radius_sq,
            next_ticket: std::sync::atomic::AtomicU64::new(1),
        })
    }

    /// Submit or poll a path query for `id`.
    ///
    /// Tiered resolution, checked in order:
    ///
    /// 1. An outstanding request for `id`: a recorded result is popped,
    ///    cleared, and classified; otherwise `Running`. The arguments
    ///    of a poll are ignored in favor of the original request.
    /// 2. Synchronous fast paths: unwalkable goal and region-index
    ///    rejection (`NoConnection` without any search); orthogonal
    ///    same-level adjacency (`FoundPath([goal])`); short same-level
    ///    queries via the naive greedy walk.
    /// 3. Otherwise the query is marked in-flight, a search job is
    ///    queued to the pool, and `Running` is returned immediately.
    pub fn request(
        &self,
        id: RequesterId,
        start: Coord,
        goal: Coord,
        ignore_no_pass: bool,
    ) -> PathResult {
        use std::sync::atomic::Ordering::Relaxed;

        {
            let mut jobs = self.shared.jobs();
            if jobs.contains_key(&id) {
                if matches!(jobs[&id].state, JobState::Running) {
                    return PathResult::Running;
                }
                let record = jobs
                    .swap_remove(&id)
                    .expect("record observed under the same lock");
                self.shared.metrics.results_delivered.fetch_add(1, Relaxed);
                let JobState::Finished(path) = record.state else {
                    unreachable!("running state returned above");
                };
                return PathResult::from_finished(path);
            }
        }

        // Fast synchronous checks before touching the worker pool.
        if !self.world.is_walkable(goal) {
            self.shared
                .metrics
                .goal_unwalkable_rejections
                .fetch_add(1, Relaxed);
            return PathResult::NoConnection;
        }
        if !self.regions.same_region(start, goal) {
            self.shared.metrics.region_rejections.fetch_add(1, Relaxed);
            return PathResult::NoConnection;
        }
        if start.dist_square_weighted(goal, 2) == 1 {
            self.shared.metrics.adjacency_hits.fetch_add(1, Relaxed);
            return PathResult::FoundPath(vec![goal]);
        }
        if start.z == goal.z && start.dist_square(goal) < self.naive_walk_radius_sq {
            if let Some(path) = self.naive_walk(start, goal) {
                self.shared.metrics.naive_walk_hits.fetch_add(1, Relaxed);
                return PathResult::FoundPath(path);
            }
            self.shared.metrics.naive_walk_misses.fetch_add(1, Relaxed);
        }

        // No trivial solution; hand the query to a worker.
        let ticket = self.next_ticket.fetch_add(1, Relaxed);
        let cancel = CancelToken::new();
        self.shared.jobs().insert(
            id,
            QueryRecord {
                start,
                goal,
                ignore_no_pass,
                ticket,
                cancel: cancel.clone(),
                state: JobState::Running,
            },
        );
        self.shared.metrics.searches_submitted.fetch_add(1, Relaxed);
        self.pool.submit(SearchJob {
            id,
            ticket,
            start,
            goal,
            ignore_no_pass,
            cancel,
        });
        PathResult::Running
    }

    /// Cancel the outstanding request for `id`, if any.
    ///
    /// The record is removed immediately — subsequent polls for `id`
    /// start a fresh query — and the in-flight search is asked to stop
    /// cooperatively. Limitations: the search may run up to its next
    /// token check before stopping, and a cancel followed immediately
    /// by a re-request can briefly overlap two workers for the same
    /// id; the ticket guard keeps the surviving record coherent.
    pub fn cancel(&self, id: RequesterId) {
        let removed = self.shared.jobs().swap_remove(&id);
        if let Some(record) = removed {
            if matches!(record.state, JobState::Running) {
                record.cancel.cancel();
            }
        }
    }

    /// The query recorded as outstanding for `id`, if any:
    /// `(start, goal, ignore_no_pass)`.
    pub fn outstanding(&self, id: RequesterId) -> Option<(Coord, Coord, bool)> {
        self.shared
            .jobs()
            .get(&id)
            .map(|r| (r.start, r.goal, r.ignore_no_pass))
    }

    /// Point-in-time copy of the cumulative dispatcher counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Greedy shortcut for short same-level queries: walk backward
    /// from the goal, stepping to the same-level precomputed neighbor
    /// closest to the start. Diagonal neighbors count, so a diagonally
    /// adjacent pair resolves in one step. Abandons the attempt
    /// entirely when even the closest neighbor fails to strictly
    /// improve — no partial fallback.
    fn naive_walk(&self, start: Coord, goal: Coord) -> Option<Vec<Coord>> {
        let mut walk = vec![goal];
        let mut current = goal;
        while current != start {
            let here = current.dist_square(start);
            let step = self
                .world
                .connected_same_level_neighbors(current)
                .into_iter()
                .filter(|n| n.z == current.z)
                .min_by_key(|n| n.dist_square(start))
                .filter(|n| n.dist_square(start) < here)?;
            current = step;
            walk.push(step);
        }
        // The caller already stands on the start tile.
        if walk.len() > 1 {
            walk.pop();
        }
        walk.reverse();
        Some(walk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warren_core::GridDims;
    use warren_test_utils::{FloodRegionIndex, StaticRegionIndex, VoxelWorld};

    fn flat_room() -> Arc<VoxelWorld> {
        let mut world = VoxelWorld::new(GridDims::new(8, 8, 1));
        world.open_room(Coord::new(0, 0, 0), Coord::new(7, 7, 0));
        Arc::new(world)
    }

    fn dispatcher_over(world: Arc<VoxelWorld>) -> Dispatcher {
        let regions = Arc::new(FloodRegionIndex::build(&world));
        Dispatcher::new(world, regions, EngineConfig::default()).unwrap()
    }

    #[test]
    fn unwalkable_goal_is_no_connection() {
        let mut world = VoxelWorld::new(GridDims::new(8, 8, 1));
        world.open_room(Coord::new(0, 0, 0), Coord::new(7, 7, 0));
        world.block(Coord::new(7, 7, 0));
        let dispatcher = dispatcher_over(Arc::new(world));
        let result = dispatcher.request(
            RequesterId(1),
            Coord::new(0, 0, 0),
            Coord::new(7, 7, 0),
            false,
        );
        assert_eq!(result, PathResult::NoConnection);
        assert_eq!(dispatcher.metrics().goal_unwalkable_rejections, 1);
        assert_eq!(dispatcher.metrics().searches_submitted, 0);
    }

    #[test]
    fn region_rejection_skips_the_search() {
        let world = flat_room();
        let regions = Arc::new(StaticRegionIndex::new(false));
        let dispatcher =
            Dispatcher::new(world, regions.clone(), EngineConfig::default()).unwrap();
        let result = dispatcher.request(
            RequesterId(9),
            Coord::new(0, 0, 0),
            Coord::new(7, 7, 0),
            false,
        );
        assert_eq!(result, PathResult::NoConnection);
        assert_eq!(regions.calls(), 1);
        let metrics = dispatcher.metrics();
        assert_eq!(metrics.region_rejections, 1);
        assert_eq!(metrics.searches_submitted, 0);
    }

    #[test]
    fn orthogonal_adjacency_is_trivial() {
        let dispatcher = dispatcher_over(flat_room());
        let start = Coord::new(3, 3, 0);
        let goal = start.east();
        let result = dispatcher.request(RequesterId(2), start, goal, false);
        assert_eq!(result, PathResult::FoundPath(vec![goal]));
        assert_eq!(dispatcher.metrics().adjacency_hits, 1);
    }

    #[test]
    fn diagonal_adjacency_resolves_via_naive_walk() {
        let dispatcher = dispatcher_over(flat_room());
        let start = Coord::new(3, 3, 0);
        let goal = start.north_east();
        let result = dispatcher.request(RequesterId(3), start, goal, false);
        assert_eq!(result, PathResult::FoundPath(vec![goal]));
        assert_eq!(dispatcher.metrics().naive_walk_hits, 1);
        assert_eq!(dispatcher.metrics().searches_submitted, 0);
    }

    #[test]
    fn naive_walk_prefers_the_closest_neighbor() {
        let dispatcher = dispatcher_over(flat_room());
        let start = Coord::new(2, 2, 0);
        let goal = Coord::new(4, 4, 0);
        let result = dispatcher.request(RequesterId(8), start, goal, false);
        // Two diagonal steps, never a cardinal detour.
        let expected = vec![Coord::new(3, 3, 0), goal];
        assert_eq!(result, PathResult::FoundPath(expected));
        assert_eq!(dispatcher.metrics().naive_walk_hits, 1);
    }

    #[test]
    fn naive_walk_abandons_rather_than_detours() {
        // A wall between start and goal forces any greedy same-level
        // step to be non-improving at some point.
        let mut world = VoxelWorld::new(GridDims::new(8, 8, 1));
        world.open_room(Coord::new(0, 0, 0), Coord::new(7, 7, 0));
        for y in 0..6 {
            world.block(Coord::new(3, y, 0));
        }
        let world = Arc::new(world);
        let dispatcher = dispatcher_over(Arc::clone(&world));
        let result = dispatcher.request(
            RequesterId(4),
            Coord::new(2, 0, 0),
            Coord::new(4, 0, 0),
            false,
        );
        assert_eq!(result, PathResult::Running);
        assert_eq!(dispatcher.metrics().naive_walk_misses, 1);
        assert_eq!(dispatcher.metrics().searches_submitted, 1);
    }

    #[test]
    fn cancel_removes_the_record() {
        let mut world = VoxelWorld::new(GridDims::new(16, 16, 1));
        world.open_room(Coord::new(0, 0, 0), Coord::new(15, 15, 0));
        let dispatcher = dispatcher_over(Arc::new(world));
        let id = RequesterId(5);
        let start = Coord::new(0, 0, 0);
        let goal = Coord::new(15, 15, 0);
        let result = dispatcher.request(id, start, goal, false);
        // Either still running or already resolved by a fast worker.
        if result == PathResult::Running {
            assert_eq!(dispatcher.outstanding(id), Some((start, goal, false)));
            dispatcher.cancel(id);
            assert_eq!(dispatcher.outstanding(id), None);
        }
    }

    #[test]
    fn cancel_of_unknown_id_is_harmless() {
        let dispatcher = dispatcher_over(flat_room());
        dispatcher.cancel(RequesterId(77));
        assert_eq!(dispatcher.metrics(), MetricsSnapshot::default());
    }
}
