//! A*-style voxel graph search for the Warren pathfinding engine.
//!
//! One [`PathSearch`] runs one complete search for one
//! `(start, goal-set)` pair against a read-only [`WorldGrid`]
//! snapshot, producing an ordered coordinate list per goal (empty =
//! unreachable). The search is deliberately *not* classically
//! admissible: by default the heuristic is the edge-cost function
//! itself, a calibrated middle ground that narrows expansion at the
//! price of provable optimality (see [`Heuristic`]).
//!
//! [`WorldGrid`]: warren_core::WorldGrid

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod cost;
pub mod frontier;
pub mod worker;

pub use cancel::CancelToken;
pub use cost::{edge_cost, Heuristic};
pub use frontier::Frontier;
pub use worker::{GoalPath, PathSearch};
