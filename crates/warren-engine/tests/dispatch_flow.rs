//! Dispatcher lifecycle tests: submit, poll, resolve, cancel, and
//! path validity over randomized worlds.

use std::sync::Arc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use warren_core::{Coord, GridDims, PathResult, RegionIndex, RequesterId};
use warren_engine::{Dispatcher, EngineConfig};
use warren_test_utils::{is_legal_move, FloodRegionIndex, VoxelWorld};

const POLL_DEADLINE: Duration = Duration::from_secs(5);

fn dispatcher_over(world: Arc<VoxelWorld>) -> Dispatcher {
    let regions = Arc::new(FloodRegionIndex::build(&world));
    Dispatcher::new(world, regions, EngineConfig::default()).unwrap()
}

/// Poll `request` once per millisecond until it stops reporting
/// `Running`, the way a simulation tick loop would.
fn poll_until_done(
    dispatcher: &Dispatcher,
    id: RequesterId,
    start: Coord,
    goal: Coord,
) -> PathResult {
    let deadline = Instant::now() + POLL_DEADLINE;
    loop {
        match dispatcher.request(id, start, goal, false) {
            PathResult::Running => {
                assert!(Instant::now() < deadline, "search for {id} never resolved");
                std::thread::sleep(Duration::from_millis(1));
            }
            done => return done,
        }
    }
}

fn assert_path_legal(world: &VoxelWorld, start: Coord, goal: Coord, path: &[Coord]) {
    assert_eq!(*path.last().unwrap(), goal);
    let mut from = start;
    for &to in path {
        assert!(
            is_legal_move(world, from, to, false),
            "illegal step {from} -> {to}",
        );
        from = to;
    }
}

#[test]
fn long_query_resolves_through_polling() {
    let mut world = VoxelWorld::new(GridDims::new(24, 24, 1));
    world.open_room(Coord::new(0, 0, 0), Coord::new(23, 23, 0));
    let world = Arc::new(world);
    let dispatcher = dispatcher_over(Arc::clone(&world));

    let start = Coord::new(0, 0, 0);
    let goal = Coord::new(23, 23, 0);
    let result = poll_until_done(&dispatcher, RequesterId(1), start, goal);
    let PathResult::FoundPath(path) = result else {
        panic!("expected a path, got {result:?}");
    };
    assert_path_legal(&world, start, goal, &path);
}

#[test]
fn polling_never_resubmits_a_running_query() {
    let mut world = VoxelWorld::new(GridDims::new(32, 32, 1));
    world.open_room(Coord::new(0, 0, 0), Coord::new(31, 31, 0));
    let world = Arc::new(world);
    let dispatcher = dispatcher_over(world);

    let id = RequesterId(2);
    let start = Coord::new(0, 0, 0);
    let goal = Coord::new(31, 31, 0);

    // The first call submits; every subsequent call while the worker
    // runs must poll the existing record instead of spawning another.
    let mut last = dispatcher.request(id, start, goal, false);
    for _ in 0..50 {
        if !last.is_running() {
            break;
        }
        last = dispatcher.request(id, start, goal, false);
    }
    assert_eq!(dispatcher.metrics().searches_submitted, 1);
}

#[test]
fn poll_arguments_are_ignored_while_running() {
    let mut world = VoxelWorld::new(GridDims::new(32, 32, 1));
    world.open_room(Coord::new(0, 0, 0), Coord::new(31, 31, 0));
    let world = Arc::new(world);
    let dispatcher = dispatcher_over(Arc::clone(&world));

    let id = RequesterId(3);
    let start = Coord::new(0, 0, 0);
    let goal = Coord::new(31, 31, 0);
    if dispatcher
        .request(id, start, goal, false)
        .is_running()
    {
        // Polling with a different goal must not redirect the query.
        let decoy = Coord::new(5, 5, 0);
        let _ = dispatcher.request(id, start, decoy, false);
        if let Some((_, recorded_goal, _)) = dispatcher.outstanding(id) {
            assert_eq!(recorded_goal, goal);
        }
    }
}

#[test]
fn result_is_delivered_exactly_once() {
    let mut world = VoxelWorld::new(GridDims::new(24, 24, 1));
    world.open_room(Coord::new(0, 0, 0), Coord::new(23, 23, 0));
    let dispatcher = dispatcher_over(Arc::new(world));

    let id = RequesterId(4);
    let start = Coord::new(0, 0, 0);
    let goal = Coord::new(23, 23, 0);
    let first = poll_until_done(&dispatcher, id, start, goal);
    assert!(matches!(first, PathResult::FoundPath(_)));

    // The record was popped on delivery, so the next request for the
    // same id starts fresh.
    assert_eq!(dispatcher.outstanding(id), None);
    let metrics = dispatcher.metrics();
    assert_eq!(metrics.results_delivered, 1);
}

#[test]
fn cancelled_query_can_be_resubmitted() {
    let mut world = VoxelWorld::new(GridDims::new(24, 24, 1));
    world.open_room(Coord::new(0, 0, 0), Coord::new(23, 23, 0));
    let world = Arc::new(world);
    let dispatcher = dispatcher_over(Arc::clone(&world));

    let id = RequesterId(5);
    let start = Coord::new(0, 0, 0);
    let goal = Coord::new(23, 23, 0);
    let _ = dispatcher.request(id, start, goal, false);
    dispatcher.cancel(id);
    assert_eq!(dispatcher.outstanding(id), None);

    // A fresh request for the same id runs to completion; the ticket
    // guard keeps any stale completion from the first attempt out.
    let result = poll_until_done(&dispatcher, id, start, goal);
    let PathResult::FoundPath(path) = result else {
        panic!("expected a path after resubmit, got {result:?}");
    };
    assert_path_legal(&world, start, goal, &path);
}

#[test]
fn separate_requesters_run_independently() {
    let mut world = VoxelWorld::new(GridDims::new(24, 24, 1));
    world.open_room(Coord::new(0, 0, 0), Coord::new(23, 23, 0));
    let world = Arc::new(world);
    let dispatcher = dispatcher_over(Arc::clone(&world));

    let queries = [
        (RequesterId(10), Coord::new(0, 0, 0), Coord::new(23, 23, 0)),
        (RequesterId(11), Coord::new(23, 0, 0), Coord::new(0, 23, 0)),
        (RequesterId(12), Coord::new(0, 23, 0), Coord::new(23, 0, 0)),
    ];
    for (id, start, goal) in queries {
        let _ = dispatcher.request(id, start, goal, false);
    }
    for (id, start, goal) in queries {
        let result = poll_until_done(&dispatcher, id, start, goal);
        let PathResult::FoundPath(path) = result else {
            panic!("requester {id}: expected a path, got {result:?}");
        };
        assert_path_legal(&world, start, goal, &path);
    }
}

/// A single-level world with a random scattering of solid tiles.
fn random_maze(walls: &[(i16, i16)]) -> VoxelWorld {
    let mut world = VoxelWorld::new(GridDims::new(12, 12, 1));
    world.open_room(Coord::new(0, 0, 0), Coord::new(11, 11, 0));
    for &(x, y) in walls {
        world.block(Coord::new(x, y, 0));
    }
    world
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever the dispatcher answers for a random maze, it must be
    /// consistent: a found path is step-by-step legal and ends on the
    /// goal, and no-connection only happens when the region index
    /// agrees the tiles are disconnected.
    #[test]
    fn random_maze_answers_are_consistent(
        walls in proptest::collection::vec((0i16..12, 0i16..12), 0..40),
        sx in 0i16..12, sy in 0i16..12,
        gx in 0i16..12, gy in 0i16..12,
    ) {
        let world = random_maze(&walls);
        let start = Coord::new(sx, sy, 0);
        let goal = Coord::new(gx, gy, 0);
        prop_assume!(start != goal);
        prop_assume!(world.passable(start) && world.passable(goal));

        let regions = FloodRegionIndex::build(&world);
        let connected = regions.same_region(start, goal);

        let world = Arc::new(world);
        let dispatcher = dispatcher_over(Arc::clone(&world));
        match poll_until_done(&dispatcher, RequesterId(1), start, goal) {
            PathResult::FoundPath(path) => {
                prop_assert!(connected);
                prop_assert_eq!(*path.last().unwrap(), goal);
                let mut from = start;
                for &to in &path {
                    prop_assert!(
                        is_legal_move(&*world, from, to, false),
                        "illegal step {} -> {}", from, to,
                    );
                    from = to;
                }
            }
            PathResult::NoConnection => prop_assert!(!connected),
            PathResult::Running => unreachable!("poll_until_done never returns Running"),
        }
    }
}
