//! The `watch` command
//!
//! Watches a checklist file (or a directory of them) and feeds every
//! observed change through an edit [`Session`]: classify the change, and
//! resort only when a single checkbox was toggled. The session's guards are
//! what keep the watcher from reacting to its own rewrites.
//!
//! For a watched directory the first observed save of each file establishes
//! its baseline; a single watched file is primed from its current content
//! at startup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;

use super::output::Output;
use crate::domain::Session;
use crate::storage::{is_own_artifact, read_document, write_document, Config, Settings};

/// File extensions treated as checklist documents in directory mode
const WATCHED_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

pub fn run(output: &Output, path: &Path, debounce_override: Option<u64>) -> Result<()> {
    if !path.exists() {
        bail!("No such file or directory: {}", path.display());
    }

    let config = Config::for_path(path)?;
    let settings = config.settings;
    let debounce = debounce_override
        .map(Duration::from_millis)
        .unwrap_or_else(|| settings.debounce());

    let single_file = path.is_file();
    let watch_root = if single_file {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    } else {
        path.to_path_buf()
    };

    let (tx, rx) = mpsc::channel();
    let mut debouncer =
        new_debouncer(debounce, tx).context("Failed to set up filesystem watcher")?;

    let mode = if single_file {
        RecursiveMode::NonRecursive
    } else {
        RecursiveMode::Recursive
    };
    debouncer
        .watcher()
        .watch(&watch_root, mode)
        .with_context(|| format!("Failed to watch {}", watch_root.display()))?;

    let mut sessions: HashMap<PathBuf, Session> = HashMap::new();

    // A single file can be primed now, so the very first toggle classifies.
    if single_file {
        if let Ok(text) = read_document(path) {
            session_for(&mut sessions, &settings, path).handle_edit(0, &text);
        }
    }

    report_watching(output, path, debounce);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let mut seen: Vec<PathBuf> = Vec::new();
                for event in &events {
                    let file = &event.path;
                    if !is_relevant(file, path, single_file) || seen.contains(file) {
                        continue;
                    }
                    seen.push(file.clone());
                    handle_change(output, &mut sessions, &settings, file)?;
                }
            }
            Ok(Err(error)) => {
                output.error(&format!("Watch error: {}", error));
            }
            Err(e) => {
                output.error(&format!("Watcher stopped: {}", e));
                break;
            }
        }
    }

    Ok(())
}

/// Runs one changed file through its session and rewrites it when the
/// session produced a resort.
fn handle_change(
    output: &Output,
    sessions: &mut HashMap<PathBuf, Session>,
    settings: &Settings,
    file: &Path,
) -> Result<()> {
    // Saves often go through delete + rename; the file may be missing for
    // a moment, in which case the next event catches up.
    let Ok(text) = read_document(file) else {
        return Ok(());
    };

    let session = session_for(sessions, settings, file);
    if let Some(edit) = session.handle_edit(0, &text) {
        write_document(file, &edit.text)?;
        report_sorted(output, file);
    }

    Ok(())
}

fn session_for<'a>(
    sessions: &'a mut HashMap<PathBuf, Session>,
    settings: &Settings,
    file: &Path,
) -> &'a mut Session {
    sessions.entry(file.to_path_buf()).or_insert_with(|| {
        Session::new(settings.sort_order.clone(), settings.scope)
            .with_guard_window(settings.guard_window())
    })
}

/// Decides whether a changed path belongs to this watch.
fn is_relevant(file: &Path, target: &Path, single_file: bool) -> bool {
    if is_own_artifact(file) {
        return false;
    }

    if single_file {
        return file.file_name() == target.file_name();
    }

    file.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WATCHED_EXTENSIONS.contains(&e))
}

fn report_watching(output: &Output, path: &Path, debounce: Duration) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "event": "watching",
            "path": path.display().to_string(),
            "debounce_ms": debounce.as_millis() as u64,
        }));
    } else {
        output.success(&format!(
            "Watching {} (debounce: {}ms, Ctrl-C to stop)",
            path.display(),
            debounce.as_millis()
        ));
    }
}

fn report_sorted(output: &Output, file: &Path) {
    if output.is_json() {
        output.data(&serde_json::json!({
            "event": "sorted",
            "file": file.display().to_string(),
        }));
    } else {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        output.line(&format!("[{}] sorted {}", timestamp, file.display()));
    }
}
