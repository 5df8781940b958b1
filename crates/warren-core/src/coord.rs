//! The voxel coordinate model and dense packed indexing.

use std::fmt;

/// A voxel address in the world grid.
///
/// Coordinates are small signed integers; the engine performs no bounds
/// validation of its own beyond what the world collaborator reports as
/// walkable. The derived `Ord` gives a total lexicographic order for
/// deterministic container use.
///
/// Axis convention: north is `y - 1`, east is `x + 1`, above is `z + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// East-west axis.
    pub x: i16,
    /// North-south axis.
    pub y: i16,
    /// Vertical axis.
    pub z: i16,
}

impl Coord {
    /// Construct a coordinate from its three components.
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// The neighbor one step north (`y - 1`).
    pub const fn north(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }

    /// The neighbor one step east (`x + 1`).
    pub const fn east(self) -> Self {
        Self::new(self.x + 1, self.y, self.z)
    }

    /// The neighbor one step south (`y + 1`).
    pub const fn south(self) -> Self {
        Self::new(self.x, self.y + 1, self.z)
    }

    /// The neighbor one step west (`x - 1`).
    pub const fn west(self) -> Self {
        Self::new(self.x - 1, self.y, self.z)
    }

    /// The neighbor one level above (`z + 1`).
    pub const fn above(self) -> Self {
        Self::new(self.x, self.y, self.z + 1)
    }

    /// The neighbor one level below (`z - 1`).
    pub const fn below(self) -> Self {
        Self::new(self.x, self.y, self.z - 1)
    }

    /// The diagonal neighbor to the north-east.
    pub const fn north_east(self) -> Self {
        Self::new(self.x + 1, self.y - 1, self.z)
    }

    /// The diagonal neighbor to the south-east.
    pub const fn south_east(self) -> Self {
        Self::new(self.x + 1, self.y + 1, self.z)
    }

    /// The diagonal neighbor to the south-west.
    pub const fn south_west(self) -> Self {
        Self::new(self.x - 1, self.y + 1, self.z)
    }

    /// The diagonal neighbor to the north-west.
    pub const fn north_west(self) -> Self {
        Self::new(self.x - 1, self.y - 1, self.z)
    }

    /// The four cardinal neighbors in north, east, south, west order.
    pub const fn cardinals(self) -> [Self; 4] {
        [self.north(), self.east(), self.south(), self.west()]
    }

    /// Squared Euclidean distance to `other`.
    pub const fn dist_square(self, other: Self) -> i64 {
        self.dist_square_weighted(other, 1)
    }

    /// Squared distance with the z term weighted by `z_weight`:
    /// `dx*dx + dy*dy + dz*dz*z_weight`.
    ///
    /// A weight of 2 makes a value of exactly 1 equivalent to "one
    /// orthogonal step on the same level". Computed in i64 so the
    /// full i16 coordinate range cannot overflow.
    pub const fn dist_square_weighted(self, other: Self, z_weight: i64) -> i64 {
        let dx = self.x as i64 - other.x as i64;
        let dy = self.y as i64 - other.y as i64;
        let dz = self.z as i64 - other.z as i64;
        dx * dx + dy * dy + dz * dz * z_weight
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Dimensions of a bounded world volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    /// Extent along the x axis.
    pub x: u16,
    /// Extent along the y axis.
    pub y: u16,
    /// Extent along the z axis.
    pub z: u16,
}

impl GridDims {
    /// Construct dimensions from three extents.
    pub const fn new(x: u16, y: u16, z: u16) -> Self {
        Self { x, y, z }
    }

    /// Total number of voxels in the volume.
    pub const fn volume(self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    /// Whether `coord` lies inside the volume (all axes in `[0, dim)`).
    pub const fn contains(self, coord: Coord) -> bool {
        coord.x >= 0
            && (coord.x as i32) < self.x as i32
            && coord.y >= 0
            && (coord.y as i32) < self.y as i32
            && coord.z >= 0
            && (coord.z as i32) < self.z as i32
    }
}

/// Dense packed indexing for coordinates within a declared volume.
///
/// The packing is `x + dim_x * (y + dim_y * z)`, suitable as a flat
/// array index or set key. Dimensions are passed in explicitly at
/// construction so the indexer is reentrant across worlds and tests of
/// different sizes; nothing here reads global state.
#[derive(Clone, Copy, Debug)]
pub struct CoordIndexer {
    dims: GridDims,
}

impl CoordIndexer {
    /// Create an indexer for the given volume.
    pub const fn new(dims: GridDims) -> Self {
        Self { dims }
    }

    /// The volume this indexer packs into.
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Pack `coord` into its dense index.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the declared volume. An
    /// out-of-volume coordinate reaching the indexer means a
    /// misconfigured world collaborator, which is a precondition
    /// violation rather than a recoverable pathfinding failure.
    pub fn index(&self, coord: Coord) -> usize {
        assert!(
            self.dims.contains(coord),
            "coordinate {coord} outside declared volume {:?}",
            self.dims,
        );
        let x = coord.x as usize;
        let y = coord.y as usize;
        let z = coord.z as usize;
        x + self.dims.x as usize * (y + self.dims.y as usize * z)
    }

    /// Pack `coord` if it lies inside the volume.
    pub fn try_index(&self, coord: Coord) -> Option<usize> {
        if self.dims.contains(coord) {
            Some(self.index(coord))
        } else {
            None
        }
    }
}
