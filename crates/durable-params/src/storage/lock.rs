//! Advisory file lock held for the lifetime of a guard.
//!
//! A [`FileLock`] opens (creating if needed) the store's lock file and takes a
//! shared or exclusive `flock`. Dropping the guard releases the lock, so every
//! exit path of the enclosing operation, including `?` returns, unlocks.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use fs4::FileExt;

use crate::config::LockPolicy;
use crate::error::{ParamsError, Result};

/// Lock flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Many holders at once; excludes exclusive holders.
    Shared,
    /// Single holder.
    Exclusive,
}

/// Scoped advisory lock on a lock file.
#[derive(Debug)]
pub struct FileLock {
    path: PathBuf,
    file: Option<File>,
}

impl FileLock {
    /// Acquire `mode` on the lock file at `path`, blocking until available.
    ///
    /// Under [`LockPolicy::Degrade`] a failure to open or lock the file is
    /// logged and an unheld guard is returned, so the caller proceeds without
    /// exclusivity. Under [`LockPolicy::Strict`] the failure is returned.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Lock` under `LockPolicy::Strict` only.
    pub fn acquire(path: &Path, mode: LockMode, policy: LockPolicy) -> Result<Self> {
        match lock_file(path, mode) {
            Ok(file) => Ok(Self {
                path: path.to_path_buf(),
                file: Some(file),
            }),
            Err(source) => match policy {
                LockPolicy::Degrade => {
                    log::error!(
                        "Failed to lock file {}, errno={}: {source}",
                        path.display(),
                        source.raw_os_error().unwrap_or(0)
                    );
                    Ok(Self {
                        path: path.to_path_buf(),
                        file: None,
                    })
                }
                LockPolicy::Strict => Err(ParamsError::Lock {
                    path: path.to_path_buf(),
                    source,
                }),
            },
        }
    }

    /// Whether the lock is actually held (false after a degraded acquire).
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            // Closing the descriptor releases the flock as well.
            if let Err(e) = FileExt::unlock(&file) {
                log::warn!("Failed to unlock {}: {e}", self.path.display());
            }
        }
    }
}

/// Open the lock file read-only, creating it first if missing.
///
/// `flock` needs no write access, so a lock file owned by another user still
/// works as long as it is readable.
fn open_lock_file(path: &Path) -> std::io::Result<File> {
    match OpenOptions::new().read(true).open(path) {
        Err(e) if e.kind() == ErrorKind::NotFound => OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(0o664)
            .open(path),
        result => result,
    }
}

fn lock_file(path: &Path, mode: LockMode) -> std::io::Result<File> {
    let file = open_lock_file(path)?;

    loop {
        let result = match mode {
            LockMode::Shared => FileExt::lock_shared(&file),
            LockMode::Exclusive => FileExt::lock_exclusive(&file),
        };
        match result {
            Ok(()) => return Ok(file),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
