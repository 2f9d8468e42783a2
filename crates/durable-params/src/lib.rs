//! durable-params: crash-consistent parameter store shared across processes.
//!
//! Small values (calibration, toggles, identifiers, cached tokens) are kept
//! one file per key under a store root. Writes are atomic and durable,
//! write-class operations are serialised across processes with an advisory
//! file lock, and registered keys carry lifecycle flags that let a supervisor
//! purge whole categories at manager start, ignition changes, or panda
//! disconnect.
//!
//! ```no_run
//! use durable_params::{LifecycleEvent, Store};
//!
//! let store = Store::open_default()?;
//! store.put("DongleId", b"abc123")?;
//! assert_eq!(store.get("DongleId").as_deref(), Some(&b"abc123"[..]));
//! store.on_event(LifecycleEvent::ManagerStart)?;
//! # Ok::<(), durable_params::ParamsError>(())
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod storage;
pub mod time;

// Re-export primary types
pub use cancel::CancelToken;
pub use config::{default_root, LockPolicy, StoreConfig};
pub use error::{ParamsError, Result};
pub use lifecycle::LifecycleEvent;
pub use registry::{LifecycleFlags, Registry};
pub use storage::{Snapshot, SnapshotMode, Store};
