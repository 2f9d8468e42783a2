//! Crash-safe creation of a store root and its values directory.
//!
//! The values directory is published through a symlink at `R/d`:
//!
//! 1. create a unique temp directory `R/.tmp_*`
//! 2. symlink it under `R/.tmp_*.link`
//! 3. move the link onto `R/d` without replacing an existing entry
//!
//! Step 3 is atomic, so a concurrent process either sees no `R/d` or a
//! complete one. When it fails because another process got there first, the
//! existing `R/d` is used and the losing temp directory is removed. The move
//! is a hard link of the symlink followed by an unlink of the temp name; on
//! filesystems that refuse hard links it falls back to `rename`, where the
//! last writer wins instead.

use std::collections::HashSet;
use std::fs::{self, DirBuilder};
use std::io::ErrorKind;
use std::os::unix::fs::DirBuilderExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use crate::error::{ParamsError, Result};
use crate::storage::layout::{TMP_PREFIX, VALUES_DIR};

/// Roots already provisioned by this process.
fn provisioned_roots() -> &'static Mutex<HashSet<PathBuf>> {
    static ROOTS: OnceLock<Mutex<HashSet<PathBuf>>> = OnceLock::new();
    ROOTS.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Provision `root` unless this process already did.
pub(crate) fn ensure_provisioned(root: &Path) -> Result<()> {
    let mut roots = provisioned_roots()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if roots.contains(root) {
        return Ok(());
    }
    provision(root)?;
    roots.insert(root.to_path_buf());
    Ok(())
}

fn provision_error(path: &Path) -> impl FnOnce(std::io::Error) -> ParamsError {
    let path = path.to_path_buf();
    move |source| ParamsError::Provision { path, source }
}

/// Create `root` and its values directory if they are missing.
///
/// Idempotent and safe to run concurrently from several processes against
/// the same root.
///
/// # Errors
///
/// Returns `ParamsError::Provision` carrying the OS error when the layout
/// cannot be created. Callers cannot use the store in that case.
pub fn provision(root: &Path) -> Result<()> {
    if !root.exists() {
        DirBuilder::new()
            .recursive(true)
            .mode(0o775)
            .create(root)
            .map_err(provision_error(root))?;
    }

    let values = root.join(VALUES_DIR);
    if values.exists() {
        return Ok(());
    }

    let tmp_dir = tempfile::Builder::new()
        .prefix(TMP_PREFIX)
        .tempdir_in(root)
        .map_err(provision_error(root))?
        .keep();

    // Relative target: resolves against the root wherever it is mounted.
    let target = tmp_dir
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| tmp_dir.clone());
    let mut link = tmp_dir.clone().into_os_string();
    link.push(".link");
    let link = PathBuf::from(link);

    std::os::unix::fs::symlink(&target, &link).map_err(provision_error(&link))?;

    if let Err(e) = publish(&link, &values) {
        let _ = fs::remove_file(&link);
        let _ = fs::remove_dir(&tmp_dir);
        if !values.exists() {
            return Err(ParamsError::Provision {
                path: values,
                source: e,
            });
        }
        log::debug!("values path {} created by another process", values.display());
        return Ok(());
    }

    log::debug!(
        "provisioned params store at {} -> {}",
        values.display(),
        target.display()
    );
    Ok(())
}

/// Move `link` to `values`, failing with `AlreadyExists` if `values` is taken.
///
/// A dangling symlink at `values` does not count as taken and is replaced.
fn publish(link: &Path, values: &Path) -> std::io::Result<()> {
    match fs::hard_link(link, values) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(link) {
                log::warn!("Failed to remove {}: {e}", link.display());
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            if fs::metadata(values).is_ok() {
                return Err(e);
            }
            log::warn!("replacing dangling values link {}", values.display());
            fs::rename(link, values)
        }
        Err(e) => {
            log::debug!("hard link into {} refused ({e}), renaming", values.display());
            fs::rename(link, values)
        }
    }
}
