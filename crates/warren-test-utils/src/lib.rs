//! Test fixtures and mock collaborators for Warren development.
//!
//! - [`VoxelWorld`] — an in-memory bounded voxel grid implementing
//!   [`WorldGrid`](warren_core::WorldGrid), with builder methods for
//!   rooms, walls, fluid, stairs, and ramps.
//! - [`FloodRegionIndex`] — a connected-component index built by
//!   flood-filling a `VoxelWorld` over the engine's movement edges.
//! - [`StaticRegionIndex`] — a canned-answer region index that counts
//!   how often it is consulted.
//! - [`is_legal_move`] — the movement-legality oracle used by path
//!   validity assertions.

#![forbid(unsafe_code)]

mod fixtures;
mod legality;
mod regions;

pub use fixtures::{Tile, VoxelWorld};
pub use legality::is_legal_move;
pub use regions::{FloodRegionIndex, StaticRegionIndex};
