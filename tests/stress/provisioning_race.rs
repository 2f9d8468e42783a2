//! Stress: concurrent first-run provisioning of the same root.

use std::sync::{Arc, Barrier};
use std::thread;

use durable_params::storage::layout::VALUES_DIR;
use durable_params::storage::provision;
use durable_params::Store;

const RACERS: usize = 16;

#[test]
fn stress_concurrent_provision_yields_one_values_dir() {
    for _ in 0..10 {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("params");
        let barrier = Arc::new(Barrier::new(RACERS));

        let handles: Vec<_> = (0..RACERS)
            .map(|_| {
                let root = root.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    provision(&root)
                })
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .expect("racer panicked")
                .expect("every racer must succeed");
        }

        let values = root.join(VALUES_DIR);
        assert!(values.is_dir());
        let target = std::fs::read_link(&values).unwrap();

        // Every racer agrees on the published link from here on.
        provision(&root).unwrap();
        assert_eq!(std::fs::read_link(&values).unwrap(), target);

        // Losers clean up their links.
        let stray_links = std::fs::read_dir(&root)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".link"))
            .count();
        assert_eq!(stray_links, 0);
    }
}

#[test]
fn stress_stores_opened_concurrently_share_values() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("params");
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let root = root.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let store = Store::new(&root).unwrap();
                store.put(&format!("Racer{i}"), i.to_string()).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("racer panicked");
    }

    let all = Store::new(&root).unwrap().read_all().unwrap();
    assert_eq!(all.len(), 8, "no write may land in an orphaned values dir");
}
