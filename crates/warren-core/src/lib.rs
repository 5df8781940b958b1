//! Core types and collaborator traits for the Warren pathfinding engine.
//!
//! This crate defines the voxel [`Coord`] model, dense packed indexing
//! via [`CoordIndexer`], the tile flag newtypes the movement rules read,
//! the [`WorldGrid`] and [`RegionIndex`] traits through which the engine
//! sees the outside world, and the caller-facing [`PathResult`] enum.
//!
//! The engine itself lives in `warren-search` (the A* worker) and
//! `warren-engine` (the asynchronous dispatcher).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod flags;
pub mod id;
pub mod result;
pub mod traits;

pub use coord::{Coord, CoordIndexer, GridDims};
pub use flags::{FloorFlags, WallFlags};
pub use id::RequesterId;
pub use result::PathResult;
pub use traits::{RegionIndex, WorldGrid, DEADLY_FLUID_LEVEL};
