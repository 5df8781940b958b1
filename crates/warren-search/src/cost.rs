//! Edge cost and the pluggable heuristic strategy.

use warren_core::Coord;

/// Cost of moving between two adjacent coordinates:
/// `sqrt(|dx| + |dy| + 2*|dz|)`.
///
/// Vertical moves are weighted twice relative to horizontal ones to
/// bias the search away from unnecessary elevation changes.
pub fn edge_cost(a: Coord, b: Coord) -> f64 {
    let dx = (a.x as i32 - b.x as i32).unsigned_abs();
    let dy = (a.y as i32 - b.y as i32).unsigned_abs();
    let dz = (a.z as i32 - b.z as i32).unsigned_abs();
    f64::from(dx + dy + 2 * dz).sqrt()
}

/// Strategy for estimating remaining cost to the goal.
///
/// The default applies [`edge_cost`] to `(candidate, goal)` even though
/// the two are not adjacent. That estimate grows as the square root of
/// the remaining Manhattan distance, so it is neither admissible nor
/// aggressive — in practice it searches like a biased Dijkstra,
/// trading a provably shortest path for a smaller expansion set.
/// Swapping strategies never touches the search loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// The edge-cost function applied to `(candidate, goal)`.
    #[default]
    EdgeCost,
    /// Plain Manhattan distance `|dx| + |dy| + |dz|`. Larger than
    /// `EdgeCost` at range; narrows the search further at a higher
    /// risk of non-optimal paths.
    Manhattan,
}

impl Heuristic {
    /// Estimated remaining cost from `candidate` to `goal`.
    pub fn estimate(self, candidate: Coord, goal: Coord) -> f64 {
        match self {
            Self::EdgeCost => edge_cost(candidate, goal),
            Self::Manhattan => {
                let dx = (candidate.x as i32 - goal.x as i32).unsigned_abs();
                let dy = (candidate.y as i32 - goal.y as i32).unsigned_abs();
                let dz = (candidate.z as i32 - goal.z as i32).unsigned_abs();
                f64::from(dx + dy + dz)
            }
        }
    }
}
