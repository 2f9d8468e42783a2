//! durable-params C FFI bindings.
//!
//! Provides a C-compatible API over a parameter store: put, get (optionally
//! blocking), remove, lifecycle clears, and JSON export.
//!
#![allow(clippy::doc_overindented_list_items)]
//! # Memory contract
//!
//! - Store handles are heap-allocated Rust `Box`es and **must** be freed
//!   with [`dp_store_free`].
//! - Value buffers returned by [`dp_get`] are allocated with `malloc` and
//!   may be released with [`dp_free_bytes`] or the C library's `free`.
//! - Strings returned by [`dp_export_json`] **must** be freed with
//!   [`dp_free_string`].
//! - The static string returned by [`dp_version`] must **not** be freed.
//!
//! # Blocking reads and signals
//!
//! [`dp_get`] with `block != 0` polls until the key has a non-empty value.
//! A C program wanting SIGINT or SIGTERM to end the wait calls
//! [`dp_store_cancel`] from its own handler; the call only stores an atomic
//! flag and is async-signal-safe. Cancellation is permanent for that handle.
//!
//! # Error codes
//!
//! | Constant                 | Value | Meaning                          |
//! |--------------------------|-------|----------------------------------|
//! | `DP_OK`                  | 0     | Success                          |
//! | `DP_ERR_NULL_PTR`        | -1    | A required pointer was null      |
//! | `DP_ERR_INVALID_UTF8`    | -2    | A string was not valid UTF-8     |
//! | `DP_ERR_INVALID_KEY`     | -3    | Key cannot be used as a file name|
//! | `DP_ERR_IO`              | -4    | Filesystem I/O failure           |
//! | `DP_ERR_NOT_FOUND`       | -5    | Key has no value / not registered|
//! | `DP_ERR_LOCK`            | -6    | Lock failed under strict policy  |
//! | `DP_ERR_PROVISION`       | -7    | Store root could not be created  |
//! | `DP_ERR_SERIALIZATION`   | -8    | JSON serialization failure       |
//! | `DP_ERR_ALLOC`           | -9    | Out of memory                    |

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;

use durable_params::{
    CancelToken, LifecycleFlags, LockPolicy, ParamsError, SnapshotMode, Store, StoreConfig,
};

// ── Error codes ───────────────────────────────────────────────────────────────

/// Success.
pub const DP_OK: i32 = 0;
/// A required pointer argument was null.
pub const DP_ERR_NULL_PTR: i32 = -1;
/// A string argument contained invalid UTF-8.
pub const DP_ERR_INVALID_UTF8: i32 = -2;
/// The key is empty, contains `/` or NUL, or is a reserved name.
pub const DP_ERR_INVALID_KEY: i32 = -3;
/// A filesystem I/O operation failed.
pub const DP_ERR_IO: i32 = -4;
/// The key has no value (get, remove) or is not registered (key_type).
pub const DP_ERR_NOT_FOUND: i32 = -5;
/// The lock file could not be locked and the store is in strict mode.
pub const DP_ERR_LOCK: i32 = -6;
/// The store root or its values directory could not be created.
pub const DP_ERR_PROVISION: i32 = -7;
/// A JSON serialization operation failed.
pub const DP_ERR_SERIALIZATION: i32 = -8;
/// A buffer could not be allocated.
pub const DP_ERR_ALLOC: i32 = -9;

// ── Handle ────────────────────────────────────────────────────────────────────

/// What a `dp_store_open` handle points at.
struct StoreHandle {
    store: Store,
    cancel: CancelToken,
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Convert a `*const c_char` to a `&str`, returning an error code on failure.
///
/// # Safety
///
/// `ptr` must either be null (handled gracefully) or point to a valid,
/// null-terminated C string that remains valid for the duration of `'a`.
unsafe fn cstr_to_str<'a>(ptr: *const c_char) -> Result<&'a str, i32> {
    if ptr.is_null() {
        return Err(DP_ERR_NULL_PTR);
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| DP_ERR_INVALID_UTF8)
}

/// Borrow the handle behind `store`.
///
/// # Safety
///
/// `store` must be null or a live pointer returned by [`dp_store_open`].
unsafe fn handle<'a>(store: *const libc::c_void) -> Result<&'a StoreHandle, i32> {
    if store.is_null() {
        return Err(DP_ERR_NULL_PTR);
    }
    Ok(&*(store as *const StoreHandle))
}

/// Allocate a `CString` and write it into `*out`.
///
/// # Safety
///
/// `out` must be non-null.
unsafe fn write_string_out(s: String, out: *mut *mut c_char) -> i32 {
    if out.is_null() {
        return DP_ERR_NULL_PTR;
    }
    match CString::new(s) {
        Ok(cs) => {
            *out = cs.into_raw();
            DP_OK
        }
        Err(_) => DP_ERR_SERIALIZATION,
    }
}

/// Copy `bytes` into a fresh `malloc` buffer written to `*out`.
///
/// # Safety
///
/// `out` and `len_out` must be non-null.
unsafe fn write_bytes_out(bytes: &[u8], out: *mut *mut u8, len_out: *mut libc::size_t) -> i32 {
    // malloc(0) may return NULL; always ask for at least one byte.
    let buf = libc::malloc(bytes.len().max(1)) as *mut u8;
    if buf.is_null() {
        return DP_ERR_ALLOC;
    }
    std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf, bytes.len());
    *out = buf;
    *len_out = bytes.len();
    DP_OK
}

/// Map a [`ParamsError`] to one of the `DP_ERR_*` constants.
fn map_error(e: &ParamsError) -> i32 {
    match e {
        ParamsError::InvalidKey(_) => DP_ERR_INVALID_KEY,
        ParamsError::Io(_) if e.is_not_found() => DP_ERR_NOT_FOUND,
        ParamsError::Lock { .. } => DP_ERR_LOCK,
        ParamsError::Provision { .. } => DP_ERR_PROVISION,
        ParamsError::SerializationError(_)
        | ParamsError::InvalidFileFormat(_)
        | ParamsError::InvalidFlag(_) => DP_ERR_SERIALIZATION,
        ParamsError::Io(_) => DP_ERR_IO,
    }
}

// ── Version ───────────────────────────────────────────────────────────────────

/// Return the library version string as a null-terminated C string.
///
/// The caller **must not** free this pointer.
#[no_mangle]
pub extern "C" fn dp_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

// ── Store lifetime ────────────────────────────────────────────────────────────

/// Open (provisioning if needed) the store rooted at `root`.
///
/// # Parameters
///
/// - `root`        — store root path; pass `NULL` for the default root.
/// - `strict_lock` — non-zero to fail with `DP_ERR_LOCK` instead of
///                   proceeding unlocked when the lock file cannot be locked.
/// - `store_out`   — on success, receives a handle the caller must release
///                   with [`dp_store_free`].
///
/// # Returns
///
/// `DP_OK` on success; one of `DP_ERR_*` on failure.
///
/// # Safety
///
/// `root` must be null or a valid C string; `store_out` must be non-null.
#[no_mangle]
pub unsafe extern "C" fn dp_store_open(
    root: *const c_char,
    strict_lock: libc::c_int,
    store_out: *mut *mut libc::c_void,
) -> i32 {
    if store_out.is_null() {
        return DP_ERR_NULL_PTR;
    }

    let mut config = if root.is_null() {
        StoreConfig::default()
    } else {
        match cstr_to_str(root) {
            Ok(s) => StoreConfig::new(PathBuf::from(s)),
            Err(code) => return code,
        }
    };
    if strict_lock != 0 {
        config = config.with_lock_policy(LockPolicy::Strict);
    }

    match Store::open(config) {
        Ok(store) => {
            let handle = StoreHandle {
                store,
                cancel: CancelToken::new(),
            };
            *store_out = Box::into_raw(Box::new(handle)) as *mut libc::c_void;
            DP_OK
        }
        Err(e) => map_error(&e),
    }
}

/// Release a handle returned by [`dp_store_open`].
///
/// # Safety
///
/// `store` must be null or a handle that has not already been freed.
#[no_mangle]
pub unsafe extern "C" fn dp_store_free(store: *mut libc::c_void) {
    if !store.is_null() {
        drop(Box::from_raw(store as *mut StoreHandle));
    }
}

/// Abandon every current and future blocking [`dp_get`] on this handle.
///
/// Async-signal-safe.
///
/// # Safety
///
/// `store` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn dp_store_cancel(store: *const libc::c_void) -> i32 {
    match handle(store) {
        Ok(h) => {
            h.cancel.cancel();
            DP_OK
        }
        Err(code) => code,
    }
}

// ── Reads and writes ──────────────────────────────────────────────────────────

/// Atomically replace the value of `key` with `len` bytes at `value`.
///
/// # Safety
///
/// `store` must be a live handle, `key` a valid C string, and `value` must
/// point to `len` readable bytes (it may be null when `len` is 0).
#[no_mangle]
pub unsafe extern "C" fn dp_put(
    store: *const libc::c_void,
    key: *const c_char,
    value: *const u8,
    len: libc::size_t,
) -> i32 {
    let h = match handle(store) {
        Ok(h) => h,
        Err(code) => return code,
    };
    let key = match cstr_to_str(key) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let bytes: &[u8] = if len == 0 {
        &[]
    } else if value.is_null() {
        return DP_ERR_NULL_PTR;
    } else {
        std::slice::from_raw_parts(value, len)
    };

    match h.store.put(key, bytes) {
        Ok(()) => DP_OK,
        Err(e) => map_error(&e),
    }
}

/// Read the value of `key`.
///
/// With `block != 0`, waits until the key has a non-empty value or the
/// handle is cancelled with [`dp_store_cancel`].
///
/// # Parameters
///
/// - `value_out` — on success, receives a `malloc` buffer to be released
///                 with [`dp_free_bytes`].
/// - `len_out`   — on success, receives the value length.
///
/// # Returns
///
/// `DP_OK` on success, `DP_ERR_NOT_FOUND` when the key has no value
/// (including a cancelled blocking wait), or another `DP_ERR_*`.
///
/// # Safety
///
/// `store` must be a live handle, `key` a valid C string, and both out
/// pointers non-null.
#[no_mangle]
pub unsafe extern "C" fn dp_get(
    store: *const libc::c_void,
    key: *const c_char,
    block: libc::c_int,
    value_out: *mut *mut u8,
    len_out: *mut libc::size_t,
) -> i32 {
    if value_out.is_null() || len_out.is_null() {
        return DP_ERR_NULL_PTR;
    }
    let h = match handle(store) {
        Ok(h) => h,
        Err(code) => return code,
    };
    let key = match cstr_to_str(key) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let value = if block != 0 {
        h.store.get_blocking(key, &h.cancel)
    } else {
        h.store.get(key)
    };

    match value {
        Some(bytes) => write_bytes_out(&bytes, value_out, len_out),
        None => DP_ERR_NOT_FOUND,
    }
}

/// Delete `key`. Returns `DP_ERR_NOT_FOUND` if it had no value.
///
/// # Safety
///
/// `store` must be a live handle and `key` a valid C string.
#[no_mangle]
pub unsafe extern "C" fn dp_remove(store: *const libc::c_void, key: *const c_char) -> i32 {
    let h = match handle(store) {
        Ok(h) => h,
        Err(code) => return code,
    };
    let key = match cstr_to_str(key) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match h.store.remove(key) {
        Ok(()) => DP_OK,
        Err(e) => map_error(&e),
    }
}

/// Delete every registered key whose flags intersect `flags`.
///
/// Unknown bits in `flags` are ignored. `removed_out` may be null.
///
/// # Safety
///
/// `store` must be a live handle; `removed_out` null or writable.
#[no_mangle]
pub unsafe extern "C" fn dp_clear_all(
    store: *const libc::c_void,
    flags: u32,
    removed_out: *mut libc::size_t,
) -> i32 {
    let h = match handle(store) {
        Ok(h) => h,
        Err(code) => return code,
    };

    match h.store.clear_all(LifecycleFlags::from_bits_truncate(flags)) {
        Ok(removed) => {
            if !removed_out.is_null() {
                *removed_out = removed;
            }
            DP_OK
        }
        Err(e) => map_error(&e),
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Return 1 if `key` is registered, 0 if not or on bad arguments.
///
/// # Safety
///
/// `store` must be null or a live handle; `key` null or a valid C string.
#[no_mangle]
pub unsafe extern "C" fn dp_check_key(
    store: *const libc::c_void,
    key: *const c_char,
) -> libc::c_int {
    match (handle(store), cstr_to_str(key)) {
        (Ok(h), Ok(key)) => libc::c_int::from(h.store.check_key(key)),
        _ => 0,
    }
}

/// Write the lifecycle flags of registered `key` into `*flags_out`.
///
/// Returns `DP_ERR_NOT_FOUND` for unregistered keys.
///
/// # Safety
///
/// `store` must be a live handle, `key` a valid C string, and `flags_out`
/// non-null.
#[no_mangle]
pub unsafe extern "C" fn dp_key_type(
    store: *const libc::c_void,
    key: *const c_char,
    flags_out: *mut u32,
) -> i32 {
    if flags_out.is_null() {
        return DP_ERR_NULL_PTR;
    }
    let h = match handle(store) {
        Ok(h) => h,
        Err(code) => return code,
    };
    let key = match cstr_to_str(key) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match h.store.key_type(key) {
        Some(flags) => {
            *flags_out = flags.bits();
            DP_OK
        }
        None => DP_ERR_NOT_FOUND,
    }
}

// ── Export ────────────────────────────────────────────────────────────────────

/// Export every value as a JSON snapshot.
///
/// With `loggable != 0`, keys flagged `DONT_LOG` are left out.
///
/// # Safety
///
/// `store` must be a live handle; `json_out` non-null. The string written
/// to `*json_out` must be freed with [`dp_free_string`].
#[no_mangle]
pub unsafe extern "C" fn dp_export_json(
    store: *const libc::c_void,
    loggable: libc::c_int,
    json_out: *mut *mut c_char,
) -> i32 {
    let h = match handle(store) {
        Ok(h) => h,
        Err(code) => return code,
    };
    let mode = if loggable != 0 {
        SnapshotMode::Loggable
    } else {
        SnapshotMode::Full
    };

    match h.store.snapshot(mode).and_then(|s| s.to_json()) {
        Ok(json) => write_string_out(json, json_out),
        Err(e) => map_error(&e),
    }
}

// ── Memory management ─────────────────────────────────────────────────────────

/// Free a value buffer returned by [`dp_get`].
///
/// # Safety
///
/// `ptr` must be null or a buffer from [`dp_get`] not already freed.
#[no_mangle]
pub unsafe extern "C" fn dp_free_bytes(ptr: *mut u8) {
    if !ptr.is_null() {
        libc::free(ptr as *mut libc::c_void);
    }
}

/// Free a string returned by [`dp_export_json`].
///
/// # Safety
///
/// `s` must be null or a string from this library not already freed.
#[no_mangle]
pub unsafe extern "C" fn dp_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
