//! Wait For Key: block until another process (here, a thread) writes a key.
//!
//! Run with:
//!   cargo run --example wait_for_key -p durable-params
//!
//! Press Ctrl-C before the writer fires to see the wait abandoned.

use std::thread;
use std::time::Duration;

use durable_params::{CancelToken, Store, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let root = dir.path().join("params");

    let config = StoreConfig::new(&root).with_poll_interval(Duration::from_millis(50));
    let reader = Store::open(config)?;
    let writer = Store::new(&root)?;

    // ── 1. Writer: publish the dongle id after a delay ──────────────────────
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(2));
        if let Err(e) = writer.put("DongleId", "abc123") {
            eprintln!("writer failed: {e}");
        }
    });

    // ── 2. Reader: wait for it ──────────────────────────────────────────────
    //
    // The store never installs signal handlers itself; bridge Ctrl-C to a
    // cancel token instead.
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    ctrlc::set_handler(move || trigger.cancel())?;

    println!("Waiting for DongleId...");
    match reader.get_blocking("DongleId", &cancel) {
        Some(value) => println!("DongleId = {}", String::from_utf8_lossy(&value)),
        None => println!("Wait abandoned"),
    }
    Ok(())
}
