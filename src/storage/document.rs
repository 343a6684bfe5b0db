//! Checklist document I/O
//!
//! Documents are plain text files rewritten in place. Writes go through a
//! temp file plus rename so a watcher or editor never observes a partially
//! written document.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Reads a checklist document
pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Replaces a checklist document atomically (temp file + rename)
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("ticktidy.tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;

    fs::rename(&temp_path, path).with_context(|| {
        format!(
            "Failed to rename {} to {}",
            temp_path.display(),
            path.display()
        )
    })?;

    Ok(())
}

/// True for paths the tool itself produces while writing
pub fn is_own_artifact(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "tmp")
}
