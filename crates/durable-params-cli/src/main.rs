//! durable-params CLI: `dparams` command.
//!
//! Reads and writes parameters, runs lifecycle clears, and exports snapshots
//! of a parameter store from the shell.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};

use durable_params::time::micros_to_rfc3339;
use durable_params::{
    CancelToken, LifecycleEvent, LifecycleFlags, LockPolicy, Snapshot, SnapshotMode, Store,
    StoreConfig,
};

// ── Display helpers ───────────────────────────────────────────────────────────

const PREVIEW_CHARS: usize = 48;

/// Short, single-line rendering of a value for listings.
fn preview(value: &[u8]) -> String {
    match std::str::from_utf8(value) {
        Ok(text) if !text.chars().any(|c| c.is_control() && c != '\n') => {
            let flat = text.replace('\n', "\\n");
            if flat.chars().count() > PREVIEW_CHARS {
                let head: String = flat.chars().take(PREVIEW_CHARS).collect();
                format!("{head}…")
            } else {
                flat
            }
        }
        _ => format!("<{} bytes binary>", value.len()),
    }
}

/// Route SIGINT/SIGTERM to a cancellation token.
fn install_cancel_handler() -> Result<CancelToken> {
    let cancel = CancelToken::new();
    let trigger = cancel.clone();
    ctrlc::set_handler(move || {
        log::info!("received termination signal, abandoning wait");
        trigger.cancel();
    })
    .context("failed to install signal handler")?;
    Ok(cancel)
}

// ── CLI structure ─────────────────────────────────────────────────────────────

/// durable-params CLI: inspect and manage a crash-consistent parameter store.
#[derive(Parser, Debug)]
#[command(
    name = "dparams",
    about = "durable-params CLI",
    version,
    long_about = "dparams: durable-params CLI\n\nRead and write parameters, clear lifecycle categories,\nand export or import snapshots of a parameter store."
)]
struct Cli {
    /// Store root (default: $PARAMS_ROOT, then ~/.comma/params)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Fail instead of proceeding unlocked when the lock file cannot be locked
    #[arg(long, global = true)]
    strict_lock: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value of a key
    Get {
        key: String,

        /// Wait until the key has a value (Ctrl-C to give up)
        #[arg(long)]
        block: bool,

        /// Write the raw bytes without a trailing newline
        #[arg(long)]
        raw: bool,
    },

    /// Set the value of a key
    Put {
        key: String,

        /// Value to store
        #[arg(conflicts_with_all = ["file", "stdin"])]
        value: Option<String>,

        /// Read the value from a file
        #[arg(long, conflicts_with = "stdin")]
        file: Option<PathBuf>,

        /// Read the value from standard input
        #[arg(long)]
        stdin: bool,
    },

    /// Delete a key
    Remove {
        key: String,

        /// Succeed even if the key has no value
        #[arg(long)]
        force: bool,
    },

    /// List every stored value
    List {
        /// Hide values of keys flagged DONT_LOG
        #[arg(long)]
        loggable: bool,
    },

    /// List registered keys and their lifecycle flags
    Keys {
        /// Only keys carrying one of these flags (e.g. clear-on-manager-start)
        #[arg(long)]
        flag: Option<String>,
    },

    /// Delete every registered key matching the given flags
    Clear {
        /// Flag names separated by `|` or `,`
        flags: String,
    },

    /// Run the clear for a lifecycle transition
    Event {
        /// manager-start, ignition-on, ignition-off, or panda-disconnect
        event: String,
    },

    /// Export a JSON snapshot
    Export {
        /// Omit keys flagged DONT_LOG
        #[arg(long)]
        loggable: bool,

        /// Output file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Import a JSON snapshot
    Import {
        /// Snapshot file written by `export`
        path: PathBuf,
    },

    /// Remove temp files left behind by crashed writers
    Sweep {
        /// Minimum age in seconds of a temp file before it is removed
        #[arg(long, default_value_t = 3600)]
        older_than: u64,
    },
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let verbose = cli.verbose;
    let result = open_store(cli.root.as_deref(), cli.strict_lock)
        .and_then(|store| run(&store, cli.command, verbose));

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn open_store(root: Option<&Path>, strict_lock: bool) -> Result<Store> {
    let mut config = match root {
        Some(root) => StoreConfig::new(root),
        None => StoreConfig::default(),
    };
    if strict_lock {
        config = config.with_lock_policy(LockPolicy::Strict);
    }
    let root = config.root.clone();
    Store::open(config).with_context(|| format!("failed to open params store at {}", root.display()))
}

fn run(store: &Store, command: Commands, verbose: bool) -> Result<()> {
    match command {
        Commands::Get { key, block, raw } => cmd_get(store, &key, block, raw, verbose),
        Commands::Put {
            key,
            value,
            file,
            stdin,
        } => cmd_put(store, &key, value, file.as_deref(), stdin, verbose),
        Commands::Remove { key, force } => cmd_remove(store, &key, force, verbose),
        Commands::List { loggable } => cmd_list(store, loggable),
        Commands::Keys { flag } => cmd_keys(store, flag.as_deref()),
        Commands::Clear { flags } => cmd_clear(store, &flags, verbose),
        Commands::Event { event } => cmd_event(store, &event, verbose),
        Commands::Export { loggable, output } => cmd_export(store, loggable, output.as_deref()),
        Commands::Import { path } => cmd_import(store, &path, verbose),
        Commands::Sweep { older_than } => cmd_sweep(store, older_than),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn cmd_get(store: &Store, key: &str, block: bool, raw: bool, verbose: bool) -> Result<()> {
    if verbose && !store.check_key(key) {
        eprintln!("warning: {key} is not a registered key");
    }

    let value = if block {
        let cancel = install_cancel_handler()?;
        store.get_blocking(key, &cancel)
    } else {
        store.get(key)
    };

    let value = value.ok_or_else(|| anyhow!("no value for {key}"))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&value)?;
    if !raw {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

fn cmd_put(
    store: &Store,
    key: &str,
    value: Option<String>,
    file: Option<&Path>,
    stdin: bool,
    verbose: bool,
) -> Result<()> {
    let bytes = match (value, file) {
        (Some(value), _) => value.into_bytes(),
        (None, Some(path)) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        (None, None) if stdin => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read value from stdin")?;
            buf
        }
        (None, None) => bail!("no value given (pass VALUE, --file, or --stdin)"),
    };

    store
        .put(key, &bytes)
        .with_context(|| format!("failed to write {key}"))?;

    if verbose {
        println!("Wrote {key} ({} bytes)", bytes.len());
    }
    Ok(())
}

fn cmd_remove(store: &Store, key: &str, force: bool, verbose: bool) -> Result<()> {
    match store.remove(key) {
        Ok(()) => {
            if verbose {
                println!("Removed {key}");
            }
            Ok(())
        }
        Err(e) if force && e.is_not_found() => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to remove {key}")),
    }
}

fn cmd_list(store: &Store, loggable: bool) -> Result<()> {
    let all = store.read_all().context("failed to read params")?;

    if all.is_empty() {
        println!("No params stored in {}", store.root().display());
        return Ok(());
    }

    println!("{:<36} {:>8}  VALUE", "KEY", "BYTES");
    println!("{}", "-".repeat(72));

    for (key, value) in &all {
        let hidden = loggable
            && store
                .key_type(key)
                .is_some_and(|flags| flags.contains(LifecycleFlags::DONT_LOG));
        let shown = if hidden {
            "<hidden>".to_string()
        } else {
            preview(value)
        };
        println!("{:<36} {:>8}  {}", key, value.len(), shown);
    }
    Ok(())
}

fn cmd_keys(store: &Store, flag: Option<&str>) -> Result<()> {
    let mask = flag.map(LifecycleFlags::parse_list).transpose()?;

    let mut entries: Vec<(&str, LifecycleFlags)> = store
        .registry()
        .iter()
        .filter(|(_, flags)| mask.map_or(true, |mask| flags.intersects(mask)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (key, flags) in entries {
        let marker = if store.exists(key) { "*" } else { " " };
        println!("{marker} {key:<36} {}", flags.describe());
    }
    Ok(())
}

fn cmd_clear(store: &Store, flags: &str, verbose: bool) -> Result<()> {
    let mask = LifecycleFlags::parse_list(flags)?;
    if mask.is_empty() {
        bail!("no flags given");
    }
    let removed = store.clear_all(mask).context("failed to clear params")?;
    if verbose {
        println!("Cleared {removed} params matching {}", mask.describe());
    }
    Ok(())
}

fn cmd_event(store: &Store, event: &str, verbose: bool) -> Result<()> {
    let event: LifecycleEvent = event.parse()?;
    let removed = store
        .on_event(event)
        .with_context(|| format!("failed to clear params for {event}"))?;
    if verbose {
        println!("{event}: cleared {removed} params");
    }
    Ok(())
}

fn cmd_export(store: &Store, loggable: bool, output: Option<&Path>) -> Result<()> {
    let mode = if loggable {
        SnapshotMode::Loggable
    } else {
        SnapshotMode::Full
    };
    let snapshot = store.snapshot(mode).context("failed to snapshot params")?;
    let json = snapshot.to_json()?;

    match output {
        Some(path) => {
            std::fs::write(path, json.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} params to {} ({})",
                snapshot.len(),
                path.display(),
                micros_to_rfc3339(snapshot.created_at)
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_import(store: &Store, path: &Path, verbose: bool) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot = Snapshot::from_json(&json)?;
    let written = store.restore(&snapshot).context("failed to restore snapshot")?;
    if verbose {
        println!(
            "Imported {written} params captured at {}",
            micros_to_rfc3339(snapshot.created_at)
        );
    }
    Ok(())
}

fn cmd_sweep(store: &Store, older_than: u64) -> Result<()> {
    let removed = store
        .sweep_temp_files(Duration::from_secs(older_than))
        .context("failed to sweep temp files")?;
    println!("Removed {removed} stale temp files");
    Ok(())
}
