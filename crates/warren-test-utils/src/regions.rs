//! Region-connectivity indexes for tests.

use std::sync::atomic::{AtomicU64, Ordering};

use warren_core::{Coord, FloorFlags, RegionIndex, WallFlags, WorldGrid};

use crate::fixtures::VoxelWorld;

/// Connected-component index built by flood-filling a [`VoxelWorld`].
///
/// Components are computed over the engine's movement edges in their
/// most permissive form (no-pass ignored), so `same_region == false`
/// is authoritative for any query while `true` remains merely
/// necessary — exactly the contract `RegionIndex` specifies.
pub struct FloodRegionIndex {
    indexer: warren_core::CoordIndexer,
    region: Vec<u32>,
}

/// Region id meaning "not part of any walkable component".
const NO_REGION: u32 = 0;

impl FloodRegionIndex {
    /// Build the index from the current state of `world`.
    pub fn build(world: &VoxelWorld) -> Self {
        let dims = world.dims();
        let indexer = world.indexer();
        let mut parent: Vec<usize> = (0..dims.volume()).collect();

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }
        fn union(parent: &mut [usize], a: usize, b: usize) {
            let ra = find(parent, a);
            let rb = find(parent, b);
            if ra != rb {
                parent[rb] = ra;
            }
        }

        let link = |parent: &mut Vec<usize>, from: Coord, to: Coord| {
            if world.open_tile(to) {
                if let (Some(a), Some(b)) = (indexer.try_index(from), indexer.try_index(to)) {
                    union(parent, a, b);
                }
            }
        };

        for z in 0..dims.z as i16 {
            for y in 0..dims.y as i16 {
                for x in 0..dims.x as i16 {
                    let c = Coord::new(x, y, z);
                    if !world.open_tile(c) {
                        continue;
                    }

                    // Movement edges are symmetric at the region level,
                    // so cardinals alone cover the same-level plane;
                    // diagonals never connect anything cardinals miss.
                    for next in c.cardinals() {
                        link(&mut parent, c, next);
                        // Ramp-assisted descent through a ramp-top
                        // neighbor.
                        if world.floor_flags(next).intersects(FloorFlags::RAMP_TOP) {
                            link(&mut parent, c, next.below());
                        }
                    }

                    let wall = world.wall_flags(c);
                    if wall.intersects(WallFlags::STAIR | WallFlags::SCAFFOLD) {
                        link(&mut parent, c, c.above());
                    }
                    if world
                        .floor_flags(c)
                        .intersects(FloorFlags::STAIR_TOP | FloorFlags::SCAFFOLD)
                    {
                        link(&mut parent, c, c.below());
                    }
                    if wall.intersects(WallFlags::RAMP) {
                        for next in c.above().cardinals() {
                            link(&mut parent, c, next);
                        }
                    }
                }
            }
        }

        // Assign compact region ids to walkable roots.
        let mut region = vec![NO_REGION; dims.volume()];
        let mut next_id: u32 = 1;
        let mut root_ids: Vec<u32> = vec![NO_REGION; dims.volume()];
        for z in 0..dims.z as i16 {
            for y in 0..dims.y as i16 {
                for x in 0..dims.x as i16 {
                    let c = Coord::new(x, y, z);
                    if !world.open_tile(c) {
                        continue;
                    }
                    let i = indexer.index(c);
                    let root = find(&mut parent, i);
                    if root_ids[root] == NO_REGION {
                        root_ids[root] = next_id;
                        next_id += 1;
                    }
                    region[i] = root_ids[root];
                }
            }
        }

        Self { indexer, region }
    }

    /// The region id at `coord`, or `None` for solid/out-of-volume tiles.
    pub fn region_at(&self, coord: Coord) -> Option<u32> {
        let i = self.indexer.try_index(coord)?;
        match self.region[i] {
            NO_REGION => None,
            id => Some(id),
        }
    }
}

impl RegionIndex for FloodRegionIndex {
    fn same_region(&self, a: Coord, b: Coord) -> bool {
        match (self.region_at(a), self.region_at(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }
}

/// A region index with a canned answer that counts consultations.
///
/// Lets tests assert both outcomes ("short-circuits unreachable
/// queries") and mechanics ("the check actually ran, and no search
/// was spawned").
pub struct StaticRegionIndex {
    connected: bool,
    calls: AtomicU64,
}

impl StaticRegionIndex {
    /// An index that always answers `connected`.
    pub fn new(connected: bool) -> Self {
        Self {
            connected,
            calls: AtomicU64::new(0),
        }
    }

    /// How many times `same_region` has been consulted.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl RegionIndex for StaticRegionIndex {
    fn same_region(&self, _: Coord, _: Coord) -> bool {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.connected
    }
}
