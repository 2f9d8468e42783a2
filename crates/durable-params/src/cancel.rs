//! Cooperative cancellation for blocking reads.
//!
//! The store never installs signal handlers. A process that wants SIGINT or
//! SIGTERM to abandon a blocking read bridges its own handler to a
//! [`CancelToken`] and passes the token in.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag that asks blocking operations to give up.
///
/// Clones observe the same flag. Cancellation is one-way: once set it stays
/// set for every clone.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that has not been cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
