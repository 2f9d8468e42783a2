//! Snapshot export and restore.
//!
//! A snapshot is every stored value at one instant, serialised as JSON with
//! values base64-encoded:
//!
//! ```json
//! {
//!     "version": 1,
//!     "created_at": 1718000000000000,
//!     "params": { "DongleId": "YWJjMTIz", ... }
//! }
//! ```
//!
//! [`SnapshotMode::Loggable`] drops keys flagged `DONT_LOG`, producing the
//! view a diagnostic log may capture.

use std::collections::BTreeMap;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{ParamsError, Result};
use crate::registry::LifecycleFlags;
use crate::storage::Store;

// ── File format constants ─────────────────────────────────────────────────────

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

// ── Types ─────────────────────────────────────────────────────────────────────

/// Which values a snapshot includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotMode {
    /// Every stored value.
    Full,
    /// Every stored value except keys flagged `DONT_LOG`.
    Loggable,
}

/// Serialisable copy of a store's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Format version number.
    pub version: u32,
    /// Capture time (microseconds since Unix epoch).
    pub created_at: u64,
    /// Base64-encoded values by key.
    pub params: BTreeMap<String, String>,
}

impl Snapshot {
    /// Build a snapshot from raw values.
    pub fn from_values(values: &BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            created_at: crate::time::now_micros(),
            params: values
                .iter()
                .map(|(key, value)| {
                    (
                        key.clone(),
                        base64::engine::general_purpose::STANDARD.encode(value),
                    )
                })
                .collect(),
        }
    }

    /// Decode the base64 values back into bytes.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidFileFormat` if a value is not valid base64.
    pub fn decode(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        self.params
            .iter()
            .map(|(key, encoded)| {
                base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map(|bytes| (key.clone(), bytes))
                    .map_err(|e| {
                        ParamsError::InvalidFileFormat(format!("invalid base64 for {key}: {e}"))
                    })
            })
            .collect()
    }

    /// Serialise to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ParamsError::SerializationError(e.to_string()))
    }

    /// Parse a snapshot from JSON, checking the format version.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidFileFormat` for malformed JSON or an
    /// unsupported version.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json).map_err(|e| {
            ParamsError::InvalidFileFormat(format!("failed to parse snapshot: {e}"))
        })?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(ParamsError::InvalidFileFormat(format!(
                "unsupported snapshot version={}",
                snapshot.version
            )));
        }
        Ok(snapshot)
    }

    /// Number of values in the snapshot.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True if the snapshot holds no values.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl Store {
    /// Capture the store's current contents.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`Store::read_all`].
    pub fn snapshot(&self, mode: SnapshotMode) -> Result<Snapshot> {
        let mut values = self.read_all()?;
        if mode == SnapshotMode::Loggable {
            let registry = self.registry();
            values.retain(|key, _| {
                !registry
                    .flags_of(key)
                    .is_some_and(|flags| flags.contains(LifecycleFlags::DONT_LOG))
            });
        }
        Ok(Snapshot::from_values(&values))
    }

    /// Write every value of `snapshot` through the atomic put path.
    ///
    /// Keys absent from the snapshot are left alone. Returns the number of
    /// values written.
    ///
    /// # Errors
    ///
    /// Stops at the first failing put; values written before it stay written.
    pub fn restore(&self, snapshot: &Snapshot) -> Result<usize> {
        let values = snapshot.decode()?;
        for (key, value) in &values {
            self.put(key, value)?;
        }
        Ok(values.len())
    }
}
