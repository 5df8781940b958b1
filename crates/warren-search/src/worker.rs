//! The search worker: one complete A*-style search for one
//! `(start, goal-set)` pair.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use warren_core::{Coord, FloorFlags, WallFlags, WorldGrid, DEADLY_FLUID_LEVEL};

use crate::cancel::{CancelToken, CANCEL_CHECK_INTERVAL};
use crate::cost::{edge_cost, Heuristic};
use crate::frontier::Frontier;

/// Upper bound on the pessimistic visited-map pre-sizing, in entries.
/// Pre-sizing is purely a performance hint; a distant goal must not
/// translate into a gigantic up-front allocation.
const VISITED_CAPACITY_CAP: usize = 1 << 20;

/// Best known route to a coordinate visited during one search.
///
/// Created and updated only within a single search invocation; never
/// persisted across calls.
#[derive(Clone, Copy, Debug)]
struct PathElement {
    /// Best known cumulative path cost from the start.
    cost: f64,
    /// The coordinate this one was reached from.
    previous: Coord,
}

/// The finished result for one goal of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalPath {
    /// The goal this path leads to.
    pub goal: Coord,
    /// Coordinates from the step after the start through the goal
    /// (goal last). Empty means the goal was unreachable within the
    /// explored space.
    pub path: Vec<Coord>,
}

/// One complete search against a read-only world snapshot.
///
/// The world must not be mutated while [`run`](Self::run) executes;
/// see the precondition on [`WorldGrid`].
pub struct PathSearch<'w> {
    world: &'w dyn WorldGrid,
    start: Coord,
    goals: Vec<Coord>,
    ignore_no_pass: bool,
    heuristic: Heuristic,
    cancel: Option<CancelToken>,
}

impl<'w> PathSearch<'w> {
    /// Set up a search from `start` toward every coordinate in `goals`.
    pub fn new(world: &'w dyn WorldGrid, start: Coord, goals: Vec<Coord>, ignore_no_pass: bool) -> Self {
        Self {
            world,
            start,
            goals,
            ignore_no_pass,
            heuristic: Heuristic::default(),
            cancel: None,
        }
    }

    /// Replace the default heuristic strategy.
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Attach a cooperative cancellation token, polled every
    /// [`CANCEL_CHECK_INTERVAL`] expansions.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Run the search to completion.
    ///
    /// Goals are resolved sequentially over one shared visited map: a
    /// goal already reached while searching for an earlier one is
    /// recovered by backtracking alone; otherwise the frontier is
    /// re-weighted against the new goal and the loop resumes. Returns
    /// one [`GoalPath`] per goal, in input order; an empty `path`
    /// means that goal was unreachable. A cancelled search returns an
    /// empty vector.
    pub fn run(mut self) -> Vec<GoalPath> {
        let mut visited: HashMap<Coord, PathElement> =
            HashMap::with_capacity(self.visited_capacity());
        let mut frontier = Frontier::new();

        visited.insert(
            self.start,
            PathElement {
                cost: 0.0,
                previous: self.start,
            },
        );
        frontier.push(self.start, 0.0, 0.0);

        let goals = std::mem::take(&mut self.goals);
        let mut results = Vec::with_capacity(goals.len());
        let mut expansions: u32 = 0;

        for goal in goals {
            let mut found = visited.contains_key(&goal);
            if !found {
                // The queued f-scores still target the previous goal;
                // recompute each one from the best known cost.
                frontier.reweight(|coord| {
                    let cost = visited[&coord].cost;
                    (cost + self.heuristic.estimate(coord, goal), cost)
                });
            }

            while !found {
                let Some(entry) = frontier.pop() else { break };

                if entry.coord == goal {
                    // Keep the goal queued as a boundary node for any
                    // later goal; it is never expanded here.
                    frontier.push(entry.coord, entry.priority, entry.cost);
                    found = true;
                    break;
                }

                // A cheaper cost recorded since this entry was queued
                // makes it a redundant expansion.
                if let Some(best) = visited.get(&entry.coord) {
                    if entry.cost > best.cost {
                        continue;
                    }
                }

                expansions += 1;
                if expansions % CANCEL_CHECK_INTERVAL == 0 && self.is_cancelled() {
                    return Vec::new();
                }

                self.expand(entry.coord, goal, &mut visited, &mut frontier);
            }

            let path = if found {
                self.backtrack(goal, &visited)
            } else {
                Vec::new()
            };
            results.push(GoalPath { goal, path });
        }

        results
    }

    /// Pessimistic visited-map size guess from the squared start-goal
    /// distance. No correctness implication.
    fn visited_capacity(&self) -> usize {
        self.goals
            .iter()
            .map(|&goal| self.start.dist_square_weighted(goal, 3) / 8)
            .max()
            .unwrap_or(0)
            .try_into()
            .unwrap_or(usize::MAX)
            .min(VISITED_CAPACITY_CAP)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Expand one popped coordinate per the movement rules.
    fn expand(
        &self,
        current: Coord,
        goal: Coord,
        visited: &mut HashMap<Coord, PathElement>,
        frontier: &mut Frontier,
    ) {
        // Cardinals first, each with its ramp-assisted variant: a
        // neighbor whose floor is a ramp top drops the mover one level.
        let cardinals = current.cardinals();
        let mut open = [false; 4];
        for (i, &next) in cardinals.iter().enumerate() {
            open[i] = self.eval_move(current, next, goal, visited, frontier);
            self.eval_ramp_descent(current, next, goal, visited, frontier);
        }

        // A diagonal step is only legal when both flanking orthogonal
        // cells are open; this prevents cutting across a solid corner.
        let diagonals = [
            current.north_east(),
            current.south_east(),
            current.south_west(),
            current.north_west(),
        ];
        let flanks = [(0, 1), (1, 2), (2, 3), (3, 0)];
        for (diagonal, &(a, b)) in diagonals.into_iter().zip(flanks.iter()) {
            if open[a] && open[b] {
                self.eval_move(current, diagonal, goal, visited, frontier);
            }
        }

        // Vertical connectivity at the current tile.
        let wall = self.world.wall_flags(current);
        if wall.intersects(WallFlags::STAIR | WallFlags::SCAFFOLD) {
            self.eval_move(current, current.above(), goal, visited, frontier);
        }
        let floor = self.world.floor_flags(current);
        if floor.intersects(FloorFlags::STAIR_TOP | FloorFlags::SCAFFOLD) {
            self.eval_move(current, current.below(), goal, visited, frontier);
        }
        if wall.intersects(WallFlags::RAMP) {
            // A ramp grants the four cardinal moves one level above
            // without an intermediate step.
            for next in current.above().cardinals() {
                self.eval_move(current, next, goal, visited, frontier);
            }
        }
    }

    /// Evaluate one candidate move. Returns whether the candidate tile
    /// is enterable at all; queueing only happens when the tentative
    /// cost improves on (or first establishes) the recorded one.
    fn eval_move(
        &self,
        current: Coord,
        next: Coord,
        goal: Coord,
        visited: &mut HashMap<Coord, PathElement>,
        frontier: &mut Frontier,
    ) -> bool {
        if !self.enterable(next) {
            return false;
        }

        let new_cost = visited[&current].cost + edge_cost(current, next);
        let relaxed = match visited.entry(next) {
            Entry::Vacant(slot) => {
                slot.insert(PathElement {
                    cost: new_cost,
                    previous: current,
                });
                true
            }
            Entry::Occupied(mut slot) => {
                if new_cost < slot.get().cost {
                    slot.insert(PathElement {
                        cost: new_cost,
                        previous: current,
                    });
                    true
                } else {
                    false
                }
            }
        };
        if relaxed {
            let priority = new_cost + self.heuristic.estimate(next, goal);
            frontier.push(next, priority, new_cost);
        }
        true
    }

    /// Ramp-assisted descent: entering a neighbor flagged as a ramp
    /// top actually lands one level below it.
    fn eval_ramp_descent(
        &self,
        current: Coord,
        neighbor: Coord,
        goal: Coord,
        visited: &mut HashMap<Coord, PathElement>,
        frontier: &mut Frontier,
    ) {
        if self.world.floor_flags(neighbor).intersects(FloorFlags::RAMP_TOP) {
            self.eval_move(current, neighbor.below(), goal, visited, frontier);
        }
    }

    /// Movement legality for a candidate tile.
    fn enterable(&self, coord: Coord) -> bool {
        self.world.is_walkable(coord)
            && self.world.fluid_level(coord) < DEADLY_FLUID_LEVEL
            && (self.ignore_no_pass || !self.world.is_impassable(coord))
    }

    /// Follow `previous` pointers from the goal back to the start,
    /// then reverse into step-after-start → goal order.
    fn backtrack(&self, goal: Coord, visited: &HashMap<Coord, PathElement>) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut next = goal;
        while next != self.start {
            path.push(next);
            next = visited[&next].previous;
        }
        path.reverse();
        path
    }
}
