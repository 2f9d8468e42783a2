//! Basic Usage: write, read, and clear params in a scratch store.
//!
//! Run with:
//!   cargo run --example basic_usage -p durable-params

use durable_params::{LifecycleEvent, SnapshotMode, Store};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;

    // ── 1. Open a store ─────────────────────────────────────────────────────
    //
    // The first open provisions the root: a values directory behind the
    // stable `d` symlink and an empty `.lock` file.
    let store = Store::new(dir.path().join("params"))?;
    println!("Store opened at {}", store.root().display());
    println!("  values: {}", store.values_path().display());
    println!();

    // ── 2. Write a few values ───────────────────────────────────────────────
    store.put("DongleId", "abc123")?;
    store.put("IsOffroad", "1")?;
    store.put("AccessToken", "secret-token")?;

    for (key, value) in store.read_all()? {
        let flags = store
            .key_type(&key)
            .map(|f| f.describe())
            .unwrap_or_else(|| "unregistered".to_string());
        println!("  {key:<14} {:<10} [{flags}]", String::from_utf8_lossy(&value));
    }
    println!();

    // ── 3. Loggable snapshot ────────────────────────────────────────────────
    //
    // Keys flagged DONT_LOG are dropped from the loggable view.
    let snapshot = store.snapshot(SnapshotMode::Loggable)?;
    println!("Loggable snapshot:\n{}", snapshot.to_json()?);
    println!();

    // ── 4. Manager start ────────────────────────────────────────────────────
    let removed = store.on_event(LifecycleEvent::ManagerStart)?;
    println!("Manager start cleared {removed} params");
    println!("  remaining: {:?}", store.read_all()?.keys().collect::<Vec<_>>());

    Ok(())
}
