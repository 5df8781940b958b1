//! The caller-facing outcome of a path query.

use crate::coord::Coord;

/// Outcome of a single `request()` poll.
///
/// There are no errors in the pathfinding core: every outcome is one of
/// these three values. "No path found" is an expected result of an
/// exhausted search, not a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathResult {
    /// The goal is provably or empirically unreachable from the start.
    NoConnection,
    /// A path was found. The sequence runs from the step after the
    /// start through the reached goal (goal last) and is never empty.
    FoundPath(Vec<Coord>),
    /// The search is still in flight; poll again with the same id.
    Running,
}

impl PathResult {
    /// Classify a finished search result: an empty path means the
    /// frontier was exhausted without reaching a goal.
    pub fn from_finished(path: Vec<Coord>) -> Self {
        if path.is_empty() {
            Self::NoConnection
        } else {
            Self::FoundPath(path)
        }
    }

    /// Whether this is the `Running` placeholder.
    pub const fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_finished_path_is_no_connection() {
        assert_eq!(PathResult::from_finished(vec![]), PathResult::NoConnection);
    }

    #[test]
    fn nonempty_finished_path_is_found() {
        let goal = Coord::new(1, 0, 0);
        match PathResult::from_finished(vec![goal]) {
            PathResult::FoundPath(p) => assert_eq!(p, vec![goal]),
            other => panic!("expected FoundPath, got {other:?}"),
        }
    }
}
