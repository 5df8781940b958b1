//! Tile flag newtypes read by the movement rules.
//!
//! The world collaborator exposes wall and floor construction as small
//! bit sets. Only the bits the pathfinder reads are defined here; the
//! world is free to carry more in its own storage.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Flags describing the wall construction of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WallFlags(pub u16);

impl WallFlags {
    /// No wall construction.
    pub const NONE: Self = Self(0);
    /// Blocks line of sight.
    pub const VIEWBLOCKING: Self = Self(0x01);
    /// A staircase; grants movement to the tile directly above.
    pub const STAIR: Self = Self(0x02);
    /// A ramp; grants movement to the four cardinal tiles one level above.
    pub const RAMP: Self = Self(0x04);
    /// Scaffolding; grants movement to the tile directly above.
    pub const SCAFFOLD: Self = Self(0x08);

    /// Whether any bit of `other` is set in `self`.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for WallFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WallFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for WallFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WallFlags({:#06x})", self.0)
    }
}

/// Flags describing the floor construction of a tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FloorFlags(pub u16);

impl FloorFlags {
    /// No floor construction.
    pub const NONE: Self = Self(0);
    /// The upper landing of a staircase; grants movement to the tile
    /// directly below.
    pub const STAIR_TOP: Self = Self(0x01);
    /// The upper landing of a ramp; entering it from the side drops the
    /// mover one level down.
    pub const RAMP_TOP: Self = Self(0x02);
    /// Scaffolding; grants movement to the tile directly below.
    pub const SCAFFOLD: Self = Self(0x04);

    /// Whether any bit of `other` is set in `self`.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no bits are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FloorFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FloorFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for FloorFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloorFlags({:#06x})", self.0)
    }
}
