//! On-disk layout of a store root and the helpers that touch it directly.

use std::fs::File;
use std::path::Path;

use crate::error::{ParamsError, Result};

// ── Layout names ──────────────────────────────────────────────────────────────

/// Stable path (a symlink) of the values directory inside the root.
pub const VALUES_DIR: &str = "d";
/// Lock file used for all mutual exclusion.
pub const LOCK_FILE: &str = ".lock";
/// Prefix of every transient artefact in the root.
pub const TMP_PREFIX: &str = ".tmp_";
/// Prefix of temp files written by `put`.
pub const TMP_VALUE_PREFIX: &str = ".tmp_value_";

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Check that `key` can be used as a file name inside the values directory.
///
/// # Errors
///
/// Returns `ParamsError::InvalidKey` for empty keys, keys containing `/` or
/// NUL, `.`/`..`, and names reserved by the layout.
pub fn validate_key(key: &str) -> Result<()> {
    let reason = if key.is_empty() {
        Some("key is empty")
    } else if key.contains('/') || key.contains('\0') {
        Some("key contains a path separator or NUL")
    } else if key == "." || key == ".." {
        Some("key is a relative directory name")
    } else if key == LOCK_FILE || key.starts_with(TMP_PREFIX) {
        Some("key uses a reserved name")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ParamsError::InvalidKey(format!("{key:?}: {reason}"))),
        None => Ok(()),
    }
}

/// fsync a directory so renames and unlinks inside it survive a crash.
pub fn fsync_dir(path: &Path) -> std::io::Result<()> {
    File::open(path)?.sync_all()
}
