//! Asynchronous 3-D voxel pathfinding.
//!
//! Warren is an in-process pathfinding engine for voxel worlds with
//! walls, floors, ramps, stairs, and fluid. The entry point is
//! [`Dispatcher`]: simulation code submits a path query under a
//! requester id and polls once per tick until the query resolves to
//! [`PathResult::FoundPath`] or [`PathResult::NoConnection`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use warren::{Coord, Dispatcher, EngineConfig, PathResult, RequesterId};
//! # use warren::{RegionIndex, WorldGrid};
//! # fn collaborators() -> (Arc<dyn WorldGrid>, Arc<dyn RegionIndex>) { unimplemented!() }
//!
//! let (world, regions) = collaborators();
//! let dispatcher = Dispatcher::new(world, regions, EngineConfig::default())?;
//!
//! let id = RequesterId(42);
//! match dispatcher.request(id, Coord::new(1, 1, 0), Coord::new(30, 12, 2), false) {
//!     PathResult::FoundPath(_path) => { /* follow it */ }
//!     PathResult::NoConnection => { /* give up */ }
//!     PathResult::Running => { /* poll again next tick */ }
//! }
//! # Ok::<(), warren::ConfigError>(())
//! ```
//!
//! The engine owns no world data: tile queries and region connectivity
//! come in through the [`WorldGrid`] and [`RegionIndex`] traits, and
//! the world must stay unmutated while searches are in flight.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use warren_core::{
    Coord, CoordIndexer, FloorFlags, GridDims, PathResult, RegionIndex, RequesterId, WallFlags,
    WorldGrid, DEADLY_FLUID_LEVEL,
};
pub use warren_engine::{ConfigError, Dispatcher, EngineConfig, MetricsSnapshot};
pub use warren_search::{edge_cost, CancelToken, GoalPath, Heuristic, PathSearch};
