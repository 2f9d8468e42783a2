//! Lifecycle flags attached to registered keys.

use crate::error::{ParamsError, Result};

bitflags::bitflags! {
    /// Lifecycle categories of a parameter key.
    ///
    /// A key may carry several categories at once; a bulk clear removes every
    /// key whose flags intersect the requested mask. Bit values are part of
    /// the C ABI and must not change.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LifecycleFlags: u32 {
        /// Survives every lifecycle event.
        const PERSISTENT = 1 << 1;
        /// Erased every time the manager process starts.
        const CLEAR_ON_MANAGER_START = 1 << 2;
        /// Erased when the panda link is lost.
        const CLEAR_ON_PANDA_DISCONNECT = 1 << 3;
        /// Erased on ignition on.
        const CLEAR_ON_IGNITION_ON = 1 << 4;
        /// Erased on ignition off.
        const CLEAR_ON_IGNITION_OFF = 1 << 5;
        /// Value must not appear in captured diagnostics.
        const DONT_LOG = 1 << 6;
    }
}

impl LifecycleFlags {
    /// Every flag that triggers a bulk clear.
    pub const ALL_CLEAR: LifecycleFlags = LifecycleFlags::CLEAR_ON_MANAGER_START
        .union(LifecycleFlags::CLEAR_ON_IGNITION_ON)
        .union(LifecycleFlags::CLEAR_ON_IGNITION_OFF)
        .union(LifecycleFlags::CLEAR_ON_PANDA_DISCONNECT);

    /// Parse a single flag name.
    ///
    /// Accepts the constant spelling (`CLEAR_ON_MANAGER_START`) as well as
    /// the lowercase, dash-separated one (`clear-on-manager-start`).
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidFlag` for unknown names.
    pub fn parse(name: &str) -> Result<Self> {
        let normalized = name.trim().replace('-', "_").to_ascii_uppercase();
        LifecycleFlags::from_name(&normalized)
            .ok_or_else(|| ParamsError::InvalidFlag(name.to_string()))
    }

    /// Parse a `|` or `,` separated list of flag names into one mask.
    pub fn parse_list(names: &str) -> Result<Self> {
        names
            .split(|c: char| c == '|' || c == ',')
            .filter(|s| !s.trim().is_empty())
            .try_fold(LifecycleFlags::empty(), |acc, name| {
                Ok(acc | LifecycleFlags::parse(name)?)
            })
    }

    /// Flag names joined with `|`, for display.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "NONE".to_string();
        }
        self.iter_names()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
