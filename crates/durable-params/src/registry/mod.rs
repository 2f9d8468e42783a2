//! Key registry: which parameters exist and when they are purged.
//!
//! A [`Registry`] maps parameter names to [`LifecycleFlags`]. It is built once
//! and never mutated afterwards; stores share it through an `Arc`.
//!
//! # Modules
//!
//! - [`flags`] — the `LifecycleFlags` bitset and flag-name parsing.
//! - `keys` — the built-in vehicle key table.

pub mod flags;
mod keys;

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub use flags::LifecycleFlags;

/// Immutable mapping from parameter name to lifecycle flags.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, LifecycleFlags>,
}

impl Registry {
    /// Build a registry from `(name, flags)` pairs.
    ///
    /// A name listed twice keeps the flags of its last occurrence.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, LifecycleFlags)>,
        K: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, flags)| (name.into(), flags))
                .collect(),
        }
    }

    /// The built-in vehicle key table, constructed on first use.
    pub fn builtin() -> Arc<Registry> {
        static BUILTIN: OnceLock<Arc<Registry>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| Arc::new(Registry::from_entries(keys::BUILTIN_KEYS.iter().copied())))
            .clone()
    }

    /// Whether `key` is a registered parameter.
    pub fn is_registered(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Lifecycle flags of `key`, or `None` when the key is not registered.
    ///
    /// Unregistered keys are never treated as "no flags": they have no
    /// classification at all and are never touched by a bulk clear.
    pub fn flags_of(&self, key: &str) -> Option<LifecycleFlags> {
        self.entries.get(key).copied()
    }

    /// Registered keys whose flags intersect `mask`.
    pub fn keys_matching(&self, mask: LifecycleFlags) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |(_, flags)| flags.intersects(mask))
            .map(|(name, _)| name.as_str())
    }

    /// All registered entries, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, LifecycleFlags)> + '_ {
        self.entries.iter().map(|(name, flags)| (name.as_str(), *flags))
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
