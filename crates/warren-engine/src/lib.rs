//! Asynchronous path-query dispatcher for the Warren pathfinding engine.
//!
//! [`Dispatcher`] is the public-facing façade: callers submit path
//! queries by requester id and poll for completion. Queries resolve
//! through a tiered strategy — synchronous fast paths (unwalkable goal,
//! region-connectivity rejection, trivial adjacency, naive greedy walk)
//! before a full A* search is handed to the fixed-size worker pool.
//!
//! The dispatcher is an explicitly constructed object handed to
//! whichever simulation component needs pathfinding; there is no
//! global instance.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod metrics;
mod pool;

pub use config::{ConfigError, EngineConfig};
pub use dispatch::Dispatcher;
pub use metrics::MetricsSnapshot;
