//! The durable parameter store.
//!
//! Values live one per file under `R/d/<key>`. Writes go to a temp file in
//! `R`, are fsynced, then renamed into place under the exclusive lock, and the
//! values directory is fsynced after the rename. Readers never lock: a rename
//! swaps the whole file, so a reader sees the old or the new value, never a
//! mix. Nothing is cached in memory; every read goes to disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::cancel::CancelToken;
use crate::config::StoreConfig;
use crate::error::{ParamsError, Result};
use crate::lifecycle::LifecycleEvent;
use crate::registry::{LifecycleFlags, Registry};
use crate::storage::layout::{fsync_dir, validate_key, LOCK_FILE, TMP_VALUE_PREFIX, VALUES_DIR};
use crate::storage::lock::{FileLock, LockMode};
use crate::storage::provision;

/// Handle on a parameter store rooted at a directory.
///
/// Cheap to clone; clones share the registry and configuration. Any number of
/// handles, in any number of processes, may operate on the same root.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
    values: PathBuf,
    lock_path: PathBuf,
}

impl Store {
    /// Open a store with the given configuration.
    ///
    /// The root layout is provisioned on the first open of each distinct root
    /// in this process.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Provision` when the layout cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self> {
        provision::ensure_provisioned(&config.root)?;
        let values = config.root.join(VALUES_DIR);
        let lock_path = config.root.join(LOCK_FILE);
        Ok(Self {
            config,
            values,
            lock_path,
        })
    }

    /// Open a store at `root` with the built-in registry and defaults.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open(StoreConfig::new(root))
    }

    /// Open the store at the default root (see [`crate::config::default_root`]).
    pub fn open_default() -> Result<Self> {
        Self::open(StoreConfig::default())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Store root directory.
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// Stable path of the values directory.
    pub fn values_path(&self) -> &Path {
        &self.values
    }

    /// Registry consulted by this store.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.config.registry
    }

    /// Configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Whether `key` is registered.
    pub fn check_key(&self, key: &str) -> bool {
        self.config.registry.is_registered(key)
    }

    /// Lifecycle flags of `key`, `None` if it is not registered.
    pub fn key_type(&self, key: &str) -> Option<LifecycleFlags> {
        self.config.registry.flags_of(key)
    }

    // ── Writes ────────────────────────────────────────────────────────────────

    /// Atomically replace the value of `key`.
    ///
    /// On error the previous value, if any, is untouched.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidKey` for keys that cannot be file names,
    /// `ParamsError::Io` when writing, syncing, or renaming fails, and
    /// `ParamsError::Lock` under a strict lock policy.
    pub fn put(&self, key: &str, value: impl AsRef<[u8]>) -> Result<()> {
        validate_key(key)?;
        let value = value.as_ref();

        // Dropping the temp file on any early return deletes it.
        let mut tmp = tempfile::Builder::new()
            .prefix(TMP_VALUE_PREFIX)
            .tempfile_in(&self.config.root)?;
        tmp.write_all(value)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;

        let _lock = self.lock(LockMode::Exclusive)?;

        tmp.persist(self.value_path(key))
            .map_err(|e| ParamsError::Io(e.error))?;
        fsync_dir(&self.values)?;

        log::debug!("put {key} ({} bytes)", value.len());
        Ok(())
    }

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Removing a key that does not exist is an error: `ParamsError::Io` with
    /// kind `NotFound` (see [`ParamsError::is_not_found`]).
    pub fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let _lock = self.lock(LockMode::Exclusive)?;

        fs::remove_file(self.value_path(key))?;
        fsync_dir(&self.values)?;

        log::debug!("removed {key}");
        Ok(())
    }

    /// Delete every registered key whose flags intersect `mask`.
    ///
    /// Keys that were never written are skipped silently. Returns the number
    /// of values actually removed.
    ///
    /// # Errors
    ///
    /// Only a strict-policy lock failure is reported; per-key unlink failures
    /// and the final directory sync are not.
    pub fn clear_all(&self, mask: LifecycleFlags) -> Result<usize> {
        let _lock = self.lock(LockMode::Exclusive)?;

        let mut removed = 0;
        for key in self.config.registry.keys_matching(mask) {
            if validate_key(key).is_err() {
                continue;
            }
            if fs::remove_file(self.value_path(key)).is_ok() {
                removed += 1;
            }
        }

        if let Err(e) = fsync_dir(&self.values) {
            log::error!("Failed to sync {}: {e}", self.values.display());
        }

        log::debug!("cleared {removed} params matching {}", mask.describe());
        Ok(removed)
    }

    /// Clear the keys tied to a lifecycle transition.
    pub fn on_event(&self, event: LifecycleEvent) -> Result<usize> {
        log::info!("clearing params for {event}");
        self.clear_all(event.mask())
    }

    /// Delete temp files left in the root by writers that crashed.
    ///
    /// Only files untouched for at least `older_than` are removed, so writes
    /// still in flight are left alone. Returns the number of files removed.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Io` if the root cannot be listed.
    pub fn sweep_temp_files(&self, older_than: Duration) -> Result<usize> {
        let _lock = self.lock(LockMode::Exclusive)?;
        let now = SystemTime::now();

        let mut removed = 0;
        for entry in fs::read_dir(&self.config.root)? {
            let entry = entry?;
            let name = entry.file_name();
            if !name.to_string_lossy().starts_with(TMP_VALUE_PREFIX) {
                continue;
            }
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            let age = meta
                .modified()
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .unwrap_or_default();
            if !meta.is_file() || age < older_than {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) => log::warn!("Failed to remove {}: {e}", entry.path().display()),
            }
        }
        Ok(removed)
    }

    // ── Reads ─────────────────────────────────────────────────────────────────

    /// Read the value of `key`.
    ///
    /// Returns `None` when the key has no value, cannot be read, or is not a
    /// valid key. Takes no lock.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        if let Err(e) = validate_key(key) {
            log::warn!("{e}");
            return None;
        }
        match fs::read(self.value_path(key)) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read param {key}: {e}");
                None
            }
        }
    }

    /// Read the value of `key` as UTF-8, replacing invalid sequences.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Whether `key` currently has a value.
    pub fn exists(&self, key: &str) -> bool {
        validate_key(key).is_ok() && self.value_path(key).is_file()
    }

    /// Wait until `key` has a non-empty value, or `cancel` is triggered.
    ///
    /// Polls every `poll_interval` without holding a lock. Cancellation is
    /// noticed at the next poll, and whatever was read last (possibly `None`)
    /// is returned. A key that can never be written returns `None` at once.
    pub fn get_blocking(&self, key: &str, cancel: &CancelToken) -> Option<Vec<u8>> {
        if let Err(e) = validate_key(key) {
            log::warn!("{e}");
            return None;
        }
        let mut value = None;
        while !cancel.is_cancelled() {
            value = self.get(key);
            if value.as_ref().is_some_and(|v| !v.is_empty()) {
                break;
            }
            std::thread::sleep(self.config.poll_interval);
        }
        value
    }

    /// Read every stored value.
    ///
    /// Holds the shared lock, so the result is not interleaved with a
    /// concurrent put, remove, or clear.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Io` if the values directory cannot be listed or
    /// a value cannot be read.
    pub fn read_all(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        let _lock = self.lock(LockMode::Shared)?;

        let mut all = BTreeMap::new();
        for entry in fs::read_dir(&self.values)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Ok(key) = entry.file_name().into_string() else {
                log::warn!("skipping non UTF-8 param file {:?}", entry.file_name());
                continue;
            };
            match fs::read(entry.path()) {
                Ok(bytes) => {
                    all.insert(key, bytes);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(all)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn value_path(&self, key: &str) -> PathBuf {
        self.values.join(key)
    }

    fn lock(&self, mode: LockMode) -> Result<FileLock> {
        FileLock::acquire(&self.lock_path, mode, self.config.lock_policy)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
