//! Lifecycle transitions that trigger bulk invalidation.

use std::fmt;
use std::str::FromStr;

use crate::error::{ParamsError, Result};
use crate::registry::LifecycleFlags;

/// A system transition at which the supervisor clears parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The manager process started.
    ManagerStart,
    /// Vehicle ignition turned on.
    IgnitionOn,
    /// Vehicle ignition turned off.
    IgnitionOff,
    /// The hardware interface link was lost.
    PandaDisconnect,
}

impl LifecycleEvent {
    /// Every event, in declaration order.
    pub const ALL: [LifecycleEvent; 4] = [
        LifecycleEvent::ManagerStart,
        LifecycleEvent::IgnitionOn,
        LifecycleEvent::IgnitionOff,
        LifecycleEvent::PandaDisconnect,
    ];

    /// Flag mask cleared by this event.
    pub fn mask(self) -> LifecycleFlags {
        match self {
            LifecycleEvent::ManagerStart => LifecycleFlags::CLEAR_ON_MANAGER_START,
            LifecycleEvent::IgnitionOn => LifecycleFlags::CLEAR_ON_IGNITION_ON,
            LifecycleEvent::IgnitionOff => LifecycleFlags::CLEAR_ON_IGNITION_OFF,
            LifecycleEvent::PandaDisconnect => LifecycleFlags::CLEAR_ON_PANDA_DISCONNECT,
        }
    }

    /// Kebab-case name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleEvent::ManagerStart => "manager-start",
            LifecycleEvent::IgnitionOn => "ignition-on",
            LifecycleEvent::IgnitionOff => "ignition-off",
            LifecycleEvent::PandaDisconnect => "panda-disconnect",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('_', "-").to_ascii_lowercase();
        LifecycleEvent::ALL
            .into_iter()
            .find(|event| event.as_str() == normalized)
            .ok_or_else(|| ParamsError::InvalidFlag(s.to_string()))
    }
}
