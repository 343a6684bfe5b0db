//! The `sort` and `check` commands

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::output::Output;
use crate::domain::sort_todos;
use crate::storage::{read_document, write_document, Config};

/// Sorts one checklist file in place, or stdin to stdout for `-`.
pub fn sort(output: &Output, file: &Path, to_stdout: bool) -> Result<()> {
    if file.as_os_str() == "-" {
        return sort_stdin(output);
    }

    let config = Config::for_path(file)?;
    output.verbose_ctx(
        "sort",
        &format!(
            "Sorting {} (order: {:?}, scope: {:?})",
            file.display(),
            config.settings.sort_order.to_string(),
            config.settings.scope
        ),
    );

    let text = read_document(file)?;
    let result = sort_todos(&text, &config.settings.sort_order, config.settings.scope);
    let changed = result.output != text;

    if to_stdout {
        print!("{}", result.output);
        return Ok(());
    }

    if changed {
        write_document(file, &result.output)?;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "file": file.display().to_string(),
            "changed": changed,
        }));
    } else if changed {
        output.success(&format!("Sorted {}", file.display()));
    } else {
        output.success(&format!("{} already sorted", file.display()));
    }

    Ok(())
}

fn sort_stdin(output: &Output) -> Result<()> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;

    let config = Config::load()?;
    output.verbose_ctx("sort", "Sorting stdin");

    let result = sort_todos(&text, &config.settings.sort_order, config.settings.scope);
    print!("{}", result.output);
    Ok(())
}

/// Reports which files are not sorted, without rewriting anything.
///
/// Returns true when every file was already sorted.
pub fn check(output: &Output, files: &[PathBuf]) -> Result<bool> {
    let mut unsorted = Vec::new();

    for file in files {
        let config = Config::for_path(file)?;
        let text = read_document(file)?;
        let result = sort_todos(&text, &config.settings.sort_order, config.settings.scope);

        if result.output != text {
            output.line(&format!("{}: needs sorting", file.display()));
            unsorted.push(file.display().to_string());
        }
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "checked": files.len(),
            "unsorted": unsorted,
        }));
    } else if unsorted.is_empty() {
        output.success(&format!(
            "{} file(s) checked, all sorted",
            files.len()
        ));
    } else {
        output.error(&format!("{} file(s) need sorting", unsorted.len()));
    }

    Ok(unsorted.is_empty())
}
