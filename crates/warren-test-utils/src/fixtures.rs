//! The in-memory voxel world fixture.

use smallvec::SmallVec;
use warren_core::{
    Coord, CoordIndexer, FloorFlags, GridDims, WallFlags, WorldGrid, DEADLY_FLUID_LEVEL,
};

/// One voxel of the fixture world.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tile {
    /// Whether a mover can stand here.
    pub walkable: bool,
    /// Fluid depth in levels.
    pub fluid_level: u8,
    /// No-pass designation.
    pub no_pass: bool,
    /// Wall construction flags.
    pub wall: WallFlags,
    /// Floor construction flags.
    pub floor: FloorFlags,
}

/// A bounded in-memory voxel grid for tests.
///
/// Starts entirely solid (nothing walkable); builder methods carve out
/// rooms and add vertical connections. Tile queries outside the volume
/// report unwalkable and empty flags, matching the `WorldGrid`
/// contract.
pub struct VoxelWorld {
    dims: GridDims,
    indexer: CoordIndexer,
    tiles: Vec<Tile>,
}

impl VoxelWorld {
    /// An entirely solid world of the given dimensions.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            indexer: CoordIndexer::new(dims),
            tiles: vec![Tile::default(); dims.volume()],
        }
    }

    /// The declared volume.
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// The packed indexer over this world's volume.
    pub fn indexer(&self) -> CoordIndexer {
        self.indexer
    }

    /// The tile at `coord`, or `None` outside the volume.
    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        self.indexer.try_index(coord).map(|i| &self.tiles[i])
    }

    /// Mutable access to the tile at `coord`.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the volume.
    pub fn tile_mut(&mut self, coord: Coord) -> &mut Tile {
        let i = self.indexer.index(coord);
        &mut self.tiles[i]
    }

    /// Make every tile in the inclusive box `[min, max]` walkable.
    pub fn open_room(&mut self, min: Coord, max: Coord) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    self.tile_mut(Coord::new(x, y, z)).walkable = true;
                }
            }
        }
    }

    /// Make a single tile solid again.
    pub fn block(&mut self, coord: Coord) {
        self.tile_mut(coord).walkable = false;
    }

    /// Set the fluid depth on a tile.
    pub fn set_fluid(&mut self, coord: Coord, level: u8) {
        self.tile_mut(coord).fluid_level = level;
    }

    /// Set or clear the no-pass designation on a tile.
    pub fn set_no_pass(&mut self, coord: Coord, no_pass: bool) {
        self.tile_mut(coord).no_pass = no_pass;
    }

    /// Install a staircase connecting `lower` to the tile directly
    /// above it. Both tiles become walkable.
    pub fn add_stairs(&mut self, lower: Coord) {
        let tile = self.tile_mut(lower);
        tile.walkable = true;
        tile.wall |= WallFlags::STAIR;
        let upper = self.tile_mut(lower.above());
        upper.walkable = true;
        upper.floor |= FloorFlags::STAIR_TOP;
    }

    /// Install scaffolding connecting `lower` to the tile directly
    /// above it. Both tiles become walkable.
    pub fn add_scaffold(&mut self, lower: Coord) {
        let tile = self.tile_mut(lower);
        tile.walkable = true;
        tile.wall |= WallFlags::SCAFFOLD;
        let upper = self.tile_mut(lower.above());
        upper.walkable = true;
        upper.floor |= FloorFlags::SCAFFOLD;
    }

    /// Install a ramp at `foot` whose upper landing is `top`. Both
    /// tiles become walkable.
    ///
    /// # Panics
    ///
    /// Panics unless `top` is a cardinal neighbor of the tile directly
    /// above `foot` — the geometry a ramp requires.
    pub fn add_ramp(&mut self, foot: Coord, top: Coord) {
        assert!(
            foot.above().cardinals().contains(&top),
            "ramp top {top} must sit beside the tile above the foot {foot}",
        );
        let tile = self.tile_mut(foot);
        tile.walkable = true;
        tile.wall |= WallFlags::RAMP;
        let landing = self.tile_mut(top);
        landing.walkable = true;
        landing.floor |= FloorFlags::RAMP_TOP;
    }

    /// Legality of standing on a tile when no-pass is respected.
    pub fn passable(&self, coord: Coord) -> bool {
        self.tile(coord).is_some_and(|t| {
            t.walkable && t.fluid_level < DEADLY_FLUID_LEVEL && !t.no_pass
        })
    }

    /// Legality of standing on a tile under `ignore_no_pass`; the most
    /// permissive form, used for region connectivity.
    pub fn open_tile(&self, coord: Coord) -> bool {
        self.tile(coord)
            .is_some_and(|t| t.walkable && t.fluid_level < DEADLY_FLUID_LEVEL)
    }
}

impl WorldGrid for VoxelWorld {
    fn is_walkable(&self, coord: Coord) -> bool {
        self.tile(coord).is_some_and(|t| t.walkable)
    }

    fn fluid_level(&self, coord: Coord) -> u8 {
        self.tile(coord).map_or(0, |t| t.fluid_level)
    }

    fn is_impassable(&self, coord: Coord) -> bool {
        self.tile(coord).is_some_and(|t| t.no_pass)
    }

    fn wall_flags(&self, coord: Coord) -> WallFlags {
        self.tile(coord).map_or(WallFlags::NONE, |t| t.wall)
    }

    fn floor_flags(&self, coord: Coord) -> FloorFlags {
        self.tile(coord).map_or(FloorFlags::NONE, |t| t.floor)
    }

    fn connected_same_level_neighbors(&self, coord: Coord) -> SmallVec<[Coord; 8]> {
        let mut out = SmallVec::new();
        let cardinals = coord.cardinals();
        let mut open = [false; 4];
        for (i, &next) in cardinals.iter().enumerate() {
            if self.passable(next) {
                open[i] = true;
                out.push(next);
            }
        }
        let diagonals = [
            coord.north_east(),
            coord.south_east(),
            coord.south_west(),
            coord.north_west(),
        ];
        let flanks = [(0, 1), (1, 2), (2, 3), (3, 0)];
        for (diagonal, &(a, b)) in diagonals.into_iter().zip(flanks.iter()) {
            if open[a] && open[b] && self.passable(diagonal) {
                out.push(diagonal);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_volume_is_unwalkable() {
        let world = VoxelWorld::new(GridDims::new(4, 4, 2));
        assert!(!world.is_walkable(Coord::new(-1, 0, 0)));
        assert!(!world.is_walkable(Coord::new(0, 0, 5)));
        assert_eq!(world.wall_flags(Coord::new(99, 0, 0)), WallFlags::NONE);
    }

    #[test]
    fn open_room_carves_walkable_box() {
        let mut world = VoxelWorld::new(GridDims::new(5, 5, 1));
        world.open_room(Coord::new(1, 1, 0), Coord::new(3, 3, 0));
        assert!(world.is_walkable(Coord::new(2, 2, 0)));
        assert!(!world.is_walkable(Coord::new(0, 0, 0)));
    }

    #[test]
    fn neighbors_respect_corner_cutting() {
        let mut world = VoxelWorld::new(GridDims::new(3, 3, 1));
        world.open_room(Coord::new(0, 0, 0), Coord::new(2, 2, 0));
        // Block the two flanks of the north-east diagonal from (1,1).
        world.block(Coord::new(1, 0, 0));
        world.block(Coord::new(2, 1, 0));
        let neighbors = world.connected_same_level_neighbors(Coord::new(1, 1, 0));
        assert!(!neighbors.contains(&Coord::new(2, 0, 0)));
        assert!(neighbors.contains(&Coord::new(0, 1, 0)));
    }

    #[test]
    fn deadly_fluid_blocks_passability() {
        let mut world = VoxelWorld::new(GridDims::new(2, 1, 1));
        world.open_room(Coord::new(0, 0, 0), Coord::new(1, 0, 0));
        world.set_fluid(Coord::new(1, 0, 0), DEADLY_FLUID_LEVEL);
        assert!(!world.passable(Coord::new(1, 0, 0)));
        world.set_fluid(Coord::new(1, 0, 0), DEADLY_FLUID_LEVEL - 1);
        assert!(world.passable(Coord::new(1, 0, 0)));
    }
}
