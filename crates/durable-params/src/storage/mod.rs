//! Storage layer: the on-disk parameter store.
//!
//! # Directory layout
//!
//! ```text
//! {root}/
//! ├── d -> .tmp_XXXXXX/     — stable symlink to the values directory
//! │   └── {key}             — one file per parameter, raw value bytes
//! ├── .tmp_XXXXXX/          — the values directory itself
//! ├── .tmp_value_XXXXXX     — in-flight writes (may leak after a crash)
//! └── .lock                 — advisory lock file, no content
//! ```
//!
//! # Modules
//!
//! - [`store`] — `Store`: put, get, blocking get, remove, read_all, clear_all.
//! - [`provision`] — race-safe creation of the layout above.
//! - [`lock`] — scoped `flock` guard.
//! - [`layout`] — layout names, key validation, directory fsync.
//! - [`snapshot`] — JSON export/restore honouring `DONT_LOG`.

pub mod layout;
pub mod lock;
pub mod provision;
pub mod snapshot;
pub mod store;

// Re-export the primary types so callers can write `storage::Store`
// without reaching into sub-modules.
pub use lock::{FileLock, LockMode};
pub use provision::provision;
pub use snapshot::{Snapshot, SnapshotMode, SNAPSHOT_VERSION};
pub use store::Store;
