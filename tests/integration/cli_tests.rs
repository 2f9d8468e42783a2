//! Integration tests for the CLI binary.
//!
//! Drives the `dparams` binary against a temporary store root.
//!
//! This test is registered as a [[test]] in the durable-params-cli crate
//! so that CARGO_BIN_EXE_dparams is available.

use std::io::Write;
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Get a Command pointing to the `dparams` binary.
fn dparams_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dparams"))
}

/// Run `dparams --root <root> <args...>`.
fn run(root: &Path, args: &[&str]) -> Output {
    dparams_binary()
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("failed to execute dparams")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "dparams should succeed, stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_responds_to_help() {
    let output = dparams_binary()
        .arg("--help")
        .output()
        .expect("failed to execute dparams --help");

    assert_success(&output);
    let out = stdout(&output);
    assert!(
        out.contains("dparams") || out.contains("Usage"),
        "dparams --help output should contain usage information, got: {out}"
    );
}

#[test]
fn cli_responds_to_version() {
    let output = dparams_binary()
        .arg("--version")
        .output()
        .expect("failed to execute dparams --version");

    assert_success(&output);
    let out = stdout(&output);
    assert!(
        out.contains(env!("CARGO_PKG_VERSION")),
        "dparams --version should contain version info, got: {out}"
    );
}

#[test]
fn cli_exits_with_error_on_unknown_flag() {
    let output = dparams_binary()
        .arg("--nonexistent-flag")
        .output()
        .expect("failed to execute dparams");

    assert!(
        !output.status.success(),
        "dparams with unknown flag should exit with failure"
    );
}

#[test]
fn cli_put_get_remove_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    assert_success(&run(&root, &["put", "DongleId", "abc123"]));

    let output = run(&root, &["get", "DongleId"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "abc123\n");

    let output = run(&root, &["get", "--raw", "DongleId"]);
    assert_success(&output);
    assert_eq!(output.stdout, b"abc123");

    assert_success(&run(&root, &["remove", "DongleId"]));

    let output = run(&root, &["get", "DongleId"]);
    assert!(!output.status.success(), "get after remove should fail");
}

#[test]
fn cli_remove_missing_key_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    assert!(!run(&root, &["remove", "DongleId"]).status.success());
    assert_success(&run(&root, &["remove", "--force", "DongleId"]));
}

#[test]
fn cli_put_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    let mut child = dparams_binary()
        .arg("--root")
        .arg(&root)
        .args(["put", "--stdin", "GithubSshKeys"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn dparams");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"ssh-ed25519 AAAA\n")
        .unwrap();
    assert_success(&child.wait_with_output().unwrap());

    let value = std::fs::read(root.join("d").join("GithubSshKeys")).unwrap();
    assert_eq!(value, b"ssh-ed25519 AAAA\n");
}

#[test]
fn cli_event_clears_matching_keys() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    // IsOffroad is cleared on manager start; DongleId is persistent.
    assert_success(&run(&root, &["put", "IsOffroad", "1"]));
    assert_success(&run(&root, &["put", "DongleId", "abc123"]));

    assert_success(&run(&root, &["event", "manager-start"]));

    assert!(!run(&root, &["get", "IsOffroad"]).status.success());
    assert_eq!(stdout(&run(&root, &["get", "DongleId"])), "abc123\n");
}

#[test]
fn cli_clear_by_flag_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    assert_success(&run(&root, &["put", "CurrentRoute", "route-1"]));
    assert_success(&run(&root, &["put", "IsMetric", "1"]));
    assert_success(&run(&root, &["clear", "clear-on-ignition-on"]));
    assert!(!run(&root, &["get", "CurrentRoute"]).status.success());
    assert!(run(&root, &["get", "IsMetric"]).status.success());

    assert!(!run(&root, &["clear", "not-a-flag"]).status.success());
}

#[test]
fn cli_list_hides_dont_log_values() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    assert_success(&run(&root, &["put", "AccessToken", "secret-token"]));
    assert_success(&run(&root, &["put", "DongleId", "abc123"]));

    let full = stdout(&run(&root, &["list"]));
    assert!(full.contains("secret-token"));

    let loggable = stdout(&run(&root, &["list", "--loggable"]));
    assert!(loggable.contains("AccessToken"));
    assert!(!loggable.contains("secret-token"));
    assert!(loggable.contains("abc123"));
}

#[test]
fn cli_export_import_between_stores() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let target = dir.path().join("target");
    let snapshot = dir.path().join("snapshot.json");

    assert_success(&run(&source, &["put", "IsMetric", "1"]));
    assert_success(&run(
        &source,
        &["export", "--output", snapshot.to_str().unwrap()],
    ));

    assert_success(&run(&target, &["import", snapshot.to_str().unwrap()]));
    assert_eq!(stdout(&run(&target, &["get", "IsMetric"])), "1\n");
}

#[test]
fn cli_keys_filters_by_flag() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    let output = run(&root, &["keys", "--flag", "dont-log"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("AccessToken"));
    assert!(!out.contains("DongleId"));
}

/// Start `dparams get --block DongleId`, deliver `signal`, and return how
/// the process exited and how long it took after the signal.
fn blocked_get_after_signal(signal: libc::c_int) -> (ExitStatus, Duration) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("params");

    let mut child = dparams_binary()
        .arg("--root")
        .arg(&root)
        .args(["get", "--block", "DongleId"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn dparams");

    // Let it provision, install its handler, and start polling.
    thread::sleep(Duration::from_millis(500));
    assert!(
        child.try_wait().unwrap().is_none(),
        "get --block must still be waiting"
    );

    let pid = libc::pid_t::try_from(child.id()).unwrap();
    assert_eq!(unsafe { libc::kill(pid, signal) }, 0);
    let signalled = Instant::now();

    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return (status, signalled.elapsed());
        }
        if signalled.elapsed() > Duration::from_secs(5) {
            let _ = child.kill();
            panic!("dparams get --block ignored the signal");
        }
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn cli_get_block_ends_on_sigterm() {
    let (status, elapsed) = blocked_get_after_signal(libc::SIGTERM);

    // Exit code 1 from main, not death by the signal itself.
    assert_eq!(status.code(), Some(1), "status: {status:?}");
    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
}

#[test]
fn cli_get_block_ends_on_sigint() {
    let (status, elapsed) = blocked_get_after_signal(libc::SIGINT);

    assert_eq!(status.code(), Some(1), "status: {status:?}");
    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
}
