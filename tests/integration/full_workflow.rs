//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle of a device's params:
//! 1. Provision a fresh root
//! 2. Write persistent and per-drive values
//! 3. Read them back individually and in bulk
//! 4. Run the lifecycle clears a supervisor would run
//! 5. Reopen the store and check what survived

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use durable_params::storage::layout::{LOCK_FILE, VALUES_DIR};
use durable_params::{
    CancelToken, LifecycleEvent, LifecycleFlags, Registry, SnapshotMode, Store, StoreConfig,
};

#[test]
fn full_workflow_boot_drive_shutdown() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");

    // ── Step 1: Provision ───────────────────────────────────────────────
    let store = Store::new(&root).unwrap();
    let values_link = root.join(VALUES_DIR);
    assert!(
        std::fs::symlink_metadata(&values_link)
            .unwrap()
            .file_type()
            .is_symlink(),
        "values directory should be reached through a symlink"
    );
    assert!(values_link.is_dir());

    // ── Step 2: Write values ────────────────────────────────────────────
    store.put("DongleId", "abc123").unwrap();
    store.put("CalibrationParams", [1u8, 0, 255, 7]).unwrap();
    store.put("IsOffroad", "0").unwrap();
    store.put("CurrentRoute", "2026-10-19--08-00-00").unwrap();
    store.put("AccessToken", "secret-token").unwrap();
    assert!(root.join(LOCK_FILE).exists(), "puts should create the lock file");

    // ── Step 3: Read back ───────────────────────────────────────────────
    assert_eq!(store.get_string("DongleId").as_deref(), Some("abc123"));
    assert_eq!(store.get("CalibrationParams").unwrap(), vec![1u8, 0, 255, 7]);
    let all = store.read_all().unwrap();
    assert_eq!(all.len(), 5);
    assert_eq!(all["IsOffroad"], b"0");

    // ── Step 4: Lifecycle clears ────────────────────────────────────────
    // Ignition on drops the route but keeps manager-start keys.
    store.on_event(LifecycleEvent::IgnitionOn).unwrap();
    assert!(store.get("CurrentRoute").is_none());
    assert!(store.get("IsOffroad").is_some());

    // Manager start drops the remaining volatile keys.
    store.on_event(LifecycleEvent::ManagerStart).unwrap();
    assert!(store.get("IsOffroad").is_none());
    assert!(store.get("AccessToken").is_none());

    // ── Step 5: Reopen ──────────────────────────────────────────────────
    drop(store);
    let reopened = Store::new(&root).unwrap();
    let survivors: Vec<String> = reopened.read_all().unwrap().into_keys().collect();
    assert_eq!(survivors, vec!["CalibrationParams", "DongleId"]);
    for key in &survivors {
        assert!(reopened
            .key_type(key)
            .is_some_and(|flags| flags.contains(LifecycleFlags::PERSISTENT)));
    }
}

#[test]
fn full_workflow_custom_registry() {
    let tmp = tempfile::tempdir().unwrap();
    let registry = Arc::new(Registry::from_entries([
        ("A", LifecycleFlags::PERSISTENT),
        ("B", LifecycleFlags::CLEAR_ON_MANAGER_START),
        ("C", LifecycleFlags::CLEAR_ON_IGNITION_ON),
        ("D", LifecycleFlags::CLEAR_ON_MANAGER_START | LifecycleFlags::DONT_LOG),
    ]));
    let store =
        Store::open(StoreConfig::new(tmp.path().join("params")).with_registry(registry)).unwrap();

    for key in ["A", "B", "C", "D"] {
        store.put(key, key.to_lowercase()).unwrap();
    }
    // Unregistered keys can still be stored but no clear ever touches them.
    store.put("Scratch", "x").unwrap();

    let loggable = store.snapshot(SnapshotMode::Loggable).unwrap();
    assert!(!loggable.params.contains_key("D"));
    assert!(loggable.params.contains_key("Scratch"));

    assert_eq!(
        store.clear_all(LifecycleFlags::CLEAR_ON_MANAGER_START).unwrap(),
        2
    );
    assert_eq!(store.clear_all(LifecycleFlags::ALL_CLEAR).unwrap(), 1);

    let left: Vec<String> = store.read_all().unwrap().into_keys().collect();
    assert_eq!(left, vec!["A", "Scratch"]);
    assert!(!store.check_key("Scratch"));
}

#[test]
fn full_workflow_blocking_reader_sees_writer() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");
    let reader = Store::open(StoreConfig::new(&root).with_poll_interval(Duration::from_millis(10)))
        .unwrap();
    let writer = Store::new(&root).unwrap();

    let waiter = thread::spawn(move || reader.get_blocking("DongleId", &CancelToken::new()));

    thread::sleep(Duration::from_millis(50));
    // An empty value does not end the wait.
    writer.put("DongleId", "").unwrap();
    thread::sleep(Duration::from_millis(50));
    writer.put("DongleId", "abc123").unwrap();

    assert_eq!(waiter.join().unwrap().unwrap(), b"abc123");
}
