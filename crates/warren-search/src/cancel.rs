//! Cooperative cancellation for in-flight searches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag a dispatcher raises to ask a running search to stop.
///
/// Cancellation is cooperative: the search loop polls the token every
/// [`CANCEL_CHECK_INTERVAL`] expansions, so a cancelled search may run
/// up to that many further expansions before it notices. A cancelled
/// search abandons all remaining goals and reports nothing.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

/// Number of expansions between cancellation checks in the search loop.
pub const CANCEL_CHECK_INTERVAL: u32 = 64;

impl CancelToken {
    /// A fresh, un-raised token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the search holding this token to stop.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
