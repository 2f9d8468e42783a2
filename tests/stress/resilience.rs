//! Resilience tests: crashes mid-write, damaged layouts, lock trouble.

use std::fs;
use std::time::Duration;

use durable_params::storage::layout::{LOCK_FILE, TMP_VALUE_PREFIX, VALUES_DIR};
use durable_params::storage::provision;
use durable_params::{LockPolicy, ParamsError, Store, StoreConfig};

#[test]
fn resilience_values_survive_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");

    {
        let store = Store::new(&root).unwrap();
        store.put("DongleId", "abc123").unwrap();
        store.put("IsMetric", "1").unwrap();
        store.remove("IsMetric").unwrap();
    }

    let store = Store::new(&root).unwrap();
    assert_eq!(store.get_string("DongleId").as_deref(), Some("abc123"));
    assert!(store.get("IsMetric").is_none());
}

#[test]
fn resilience_crashed_writer_leftovers_are_ignored_then_swept() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");
    let store = Store::new(&root).unwrap();
    store.put("DongleId", "abc123").unwrap();

    // What a writer killed between write and rename leaves behind.
    let leftover = root.join(format!("{TMP_VALUE_PREFIX}crashed"));
    fs::write(&leftover, b"half-written").unwrap();

    let all = store.read_all().unwrap();
    assert_eq!(all.len(), 1, "temp files are not values");
    assert_eq!(store.get_string("DongleId").as_deref(), Some("abc123"));

    // Too young to sweep.
    assert_eq!(store.sweep_temp_files(Duration::from_secs(3600)).unwrap(), 0);
    assert!(leftover.exists());

    assert_eq!(store.sweep_temp_files(Duration::ZERO).unwrap(), 1);
    assert!(!leftover.exists());
    assert_eq!(store.get_string("DongleId").as_deref(), Some("abc123"));
}

#[test]
fn resilience_dangling_values_link_is_replaced() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");
    fs::create_dir_all(&root).unwrap();
    std::os::unix::fs::symlink(".tmp_gone", root.join(VALUES_DIR)).unwrap();

    provision(&root).expect("a dangling link should be repaired");
    assert!(root.join(VALUES_DIR).is_dir());
}

#[test]
fn resilience_values_path_blocked_by_file() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join(VALUES_DIR), b"not a directory").unwrap();

    // `d` exists, so provisioning leaves it alone; writes then fail cleanly.
    let store = Store::new(&root).unwrap();
    assert!(store.put("DongleId", "abc123").is_err());
    assert!(store.get("DongleId").is_none());
}

#[test]
fn resilience_unlockable_store_degrades_or_fails_by_policy() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");
    fs::create_dir_all(&root).unwrap();
    // Dangling into a missing directory: the lock file can be neither
    // opened nor created.
    std::os::unix::fs::symlink("missing/lock", root.join(LOCK_FILE)).unwrap();

    let degraded = Store::new(&root).unwrap();
    degraded.put("DongleId", "abc123").unwrap();
    assert_eq!(degraded.read_all().unwrap().len(), 1);

    let strict =
        Store::open(StoreConfig::new(&root).with_lock_policy(LockPolicy::Strict)).unwrap();
    assert!(matches!(
        strict.put("DongleId", "other"),
        Err(ParamsError::Lock { .. })
    ));
    assert_eq!(strict.get_string("DongleId").as_deref(), Some("abc123"));
}

#[test]
fn resilience_unprovisionable_root_reports_errno() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("file");
    fs::write(&blocker, b"x").unwrap();

    let err = Store::new(blocker.join("params")).unwrap_err();
    assert!(matches!(err, ParamsError::Provision { .. }));
    assert!(err.raw_os_error().is_some());
    assert!(err.to_string().contains("errno="));
}
