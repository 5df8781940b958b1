//! Dispatcher configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use warren_search::Heuristic;

/// Configuration for constructing a [`Dispatcher`](crate::Dispatcher).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Number of search worker threads. `None` = auto-detect
    /// (`available_parallelism / 2`, clamped to `[2, 16]`).
    pub worker_count: Option<usize>,
    /// Squared-distance threshold below which a same-level query
    /// attempts the naive greedy walk before a full search. Default: 10.
    pub naive_walk_radius_sq: i64,
    /// Heuristic strategy handed to every search. Default:
    /// [`Heuristic::EdgeCost`], preserving the calibrated
    /// non-admissible behavior of the original tuning.
    pub heuristic: Heuristic,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_count: None,
            naive_walk_radius_sq: 10,
            heuristic: Heuristic::default(),
        }
    }
}

impl EngineConfig {
    /// Resolve the actual worker count, applying auto-detection if
    /// `None`. Explicit values are clamped to `[1, 64]`; zero workers
    /// would create a dispatcher that can never finish a search.
    pub fn resolved_worker_count(&self) -> usize {
        match self.worker_count {
            Some(n) => n.clamp(1, 64),
            None => {
                let cpus = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4);
                (cpus / 2).clamp(2, 16)
            }
        }
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.naive_walk_radius_sq < 0 {
            return Err(ConfigError::InvalidNaiveWalkRadius {
                value: self.naive_walk_radius_sq,
            });
        }
        Ok(())
    }
}

/// Errors detected while constructing a dispatcher.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `naive_walk_radius_sq` is negative.
    InvalidNaiveWalkRadius {
        /// The invalid value.
        value: i64,
    },
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNaiveWalkRadius { value } => {
                write!(f, "naive_walk_radius_sq must be non-negative, got {value}")
            }
            Self::ThreadSpawnFailed { reason } => {
                write!(f, "thread spawn failed: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn negative_naive_walk_radius_fails() {
        let cfg = EngineConfig {
            naive_walk_radius_sq: -1,
            ..EngineConfig::default()
        };
        match cfg.validate() {
            Err(ConfigError::InvalidNaiveWalkRadius { value: -1 }) => {}
            other => panic!("expected InvalidNaiveWalkRadius, got {other:?}"),
        }
    }

    #[test]
    fn resolved_worker_count_clamps_zero() {
        let cfg = EngineConfig {
            worker_count: Some(0),
            ..EngineConfig::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 1);
    }

    #[test]
    fn resolved_worker_count_clamps_large() {
        let cfg = EngineConfig {
            worker_count: Some(500),
            ..EngineConfig::default()
        };
        assert_eq!(cfg.resolved_worker_count(), 64);
    }

    #[test]
    fn resolved_worker_count_auto_in_range() {
        let count = EngineConfig::default().resolved_worker_count();
        assert!((2..=16).contains(&count), "auto count {count} out of [2,16]");
    }
}
