//! Store configuration.
//!
//! [`StoreConfig`] carries everything a [`Store`](crate::Store) needs: the
//! root directory, the registry, the blocking-read poll interval, and what to
//! do when the advisory lock cannot be taken.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::registry::Registry;

/// Environment variable overriding the default store root.
pub const PARAMS_ROOT_ENV: &str = "PARAMS_ROOT";

/// On-device store root, used when no home directory is known.
pub const DEVICE_PARAMS_ROOT: &str = "/data/params";

/// Default interval between polls of a blocking read.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Behaviour when the advisory lock cannot be acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPolicy {
    /// Log the failure and run the operation without exclusivity.
    #[default]
    Degrade,
    /// Fail the operation with `ParamsError::Lock`.
    Strict,
}

/// Configuration for opening a store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store root directory.
    pub root: PathBuf,
    /// Key registry consulted by classification and bulk clear.
    pub registry: Arc<Registry>,
    /// Interval between polls of a blocking read.
    pub poll_interval: Duration,
    /// Behaviour on lock acquisition failure.
    pub lock_policy: LockPolicy,
}

impl StoreConfig {
    /// Configuration for `root` with the built-in registry and defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            registry: Registry::builtin(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            lock_policy: LockPolicy::default(),
        }
    }

    /// Use a custom registry.
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }

    /// Override the blocking-read poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the lock failure policy.
    pub fn with_lock_policy(mut self, policy: LockPolicy) -> Self {
        self.lock_policy = policy;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(default_root())
    }
}

/// Resolve the default store root.
///
/// `$PARAMS_ROOT` wins; otherwise `$HOME/.comma/params`; without a home
/// directory, the on-device location `/data/params`.
pub fn default_root() -> PathBuf {
    if let Some(root) = std::env::var_os(PARAMS_ROOT_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(root);
    }
    match std::env::var_os("HOME").filter(|v| !v.is_empty()) {
        Some(home) => PathBuf::from(home).join(".comma").join("params"),
        None => PathBuf::from(DEVICE_PARAMS_ROOT),
    }
}
