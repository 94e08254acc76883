//! Recompile sources when they change on disk.

use notify::event::EventKind;
use notify::{Event, RecursiveMode, Watcher};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{debug, info, warn};

use crate::discover::has_extension;
use crate::driver::{Driver, report};
use crate::error::Result;

/// Builds `target` once, then recompiles each changed source file until the
/// watcher shuts down.
pub fn watch(driver: &Driver, target: &Path) -> Result<()> {
    let summary = driver.build(target)?;
    info!(compiled = summary.compiled, failed = summary.failed, "initial build finished");

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx)?;
    let mode = if target.is_dir() && driver.config().recursive {
        RecursiveMode::Recursive
    } else {
        RecursiveMode::NonRecursive
    };
    watcher.watch(target, mode)?;

    println!(
        "{} {} {}",
        "Watching".green().bold(),
        target.display().cyan(),
        "(Ctrl-C to stop)".dimmed()
    );

    for event in rx {
        let event = match event {
            Ok(event) => event,
            Err(err) => {
                warn!(%err, "watch error");
                continue;
            }
        };

        for path in changed_sources(&event, &driver.config().source_extension) {
            debug!(path = %path.display(), "source changed");
            match driver.compile_file(&path) {
                Ok(()) => println!("{} {}", "Compiled".green().bold(), path.display()),
                Err(err) => report(&err),
            }
        }
    }

    Ok(())
}

/// Source files created or modified by `event`.
pub fn changed_sources(event: &Event, extension: &str) -> Vec<PathBuf> {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return Vec::new();
    }

    let mut paths: Vec<PathBuf> = event
        .paths
        .iter()
        .filter(|path| has_extension(path, extension) && path.is_file())
        .cloned()
        .collect();
    paths.dedup();
    paths
}
