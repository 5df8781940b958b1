//! Collaborator traits through which the engine sees the outside world.

use crate::coord::Coord;
use crate::flags::{FloorFlags, WallFlags};
use smallvec::SmallVec;

/// Fluid level at or above which a tile is lethal to enter.
///
/// Movement legality requires `fluid_level(coord) < DEADLY_FLUID_LEVEL`.
pub const DEADLY_FLUID_LEVEL: u8 = 6;

/// Read-only query surface over the voxel world's tile storage.
///
/// The engine owns no tiles; every legality decision during a search
/// goes through this trait. Implementations must answer for *any*
/// coordinate: out-of-volume coordinates report unwalkable (and empty
/// flags) rather than panicking, since the search probes neighbors
/// without bounds knowledge of its own.
///
/// # Precondition
///
/// The world must not be mutated while searches are in flight. The
/// engine takes no snapshot and holds no lock over tile storage; the
/// surrounding simulation upholds this invariant by only mutating
/// tiles between pathfinding windows.
pub trait WorldGrid: Send + Sync {
    /// Whether a mover can stand on this tile at all.
    fn is_walkable(&self, coord: Coord) -> bool;

    /// Current fluid depth on the tile, in levels.
    fn fluid_level(&self, coord: Coord) -> u8;

    /// Whether the tile carries the no-pass designation. Overridden by
    /// a query's `ignore_no_pass` flag.
    fn is_impassable(&self, coord: Coord) -> bool;

    /// Wall construction flags for the tile.
    fn wall_flags(&self, coord: Coord) -> WallFlags;

    /// Floor construction flags for the tile.
    fn floor_flags(&self, coord: Coord) -> FloorFlags;

    /// Precomputed legal same-level moves out of `coord`, including
    /// diagonals. Used by the dispatcher's naive greedy walk; the full
    /// search derives its own adjacency from flags instead.
    fn connected_same_level_neighbors(&self, coord: Coord) -> SmallVec<[Coord; 8]>;
}

/// Connected-component index over the walkable world.
///
/// Answers "could a path possibly exist?" in O(1)-ish amortized time so
/// the dispatcher can reject guaranteed-unreachable queries before
/// paying for a full search. A `true` answer is a necessary but not
/// sufficient condition for reachability under `ignore_no_pass = false`
/// variations; a `false` answer is authoritative.
pub trait RegionIndex: Send + Sync {
    /// Whether `a` and `b` lie in the same connected region.
    fn same_region(&self, a: Coord, b: Coord) -> bool;
}
