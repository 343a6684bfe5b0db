//! Configuration handling for ticktidy
//!
//! Settings are stored in `.ticktidy.toml` (project, found by walking up
//! from the working directory) and `~/.config/ticktidy/config.toml`
//! (global). Project values override global values field by field.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{SortOrder, SortScope};

/// Name of the per-project configuration file
pub const CONFIG_FILE_NAME: &str = ".ticktidy.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Sorting and watch behavior settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Status markers in the order they should appear
    pub sort_order: SortOrder,

    /// Whether contiguous checklist blocks sort independently or the whole
    /// document sorts as one group
    pub scope: SortScope,

    /// Minimum milliseconds between two resorts of the same document
    pub guard_window_ms: u64,

    /// Debounce for filesystem events in watch mode
    pub debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::default(),
            scope: SortScope::default(),
            guard_window_ms: 100,
            debounce_ms: 250,
        }
    }
}

impl Settings {
    /// The resort rate guard as a [`Duration`]
    pub fn guard_window(&self) -> Duration {
        Duration::from_millis(self.guard_window_ms)
    }

    /// The watch-mode debounce as a [`Duration`]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Partial settings as they appear in a config file; unset fields fall
/// through to the next layer down.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SettingsOverlay {
    sort_order: Option<SortOrder>,
    scope: Option<SortScope>,
    guard_window_ms: Option<u64>,
    debounce_ms: Option<u64>,
}

impl SettingsOverlay {
    fn apply(self, settings: &mut Settings) {
        if let Some(sort_order) = self.sort_order {
            settings.sort_order = sort_order;
        }
        if let Some(scope) = self.scope {
            settings.scope = scope;
        }
        if let Some(guard_window_ms) = self.guard_window_ms {
            settings.guard_window_ms = guard_window_ms;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            settings.debounce_ms = debounce_ms;
        }
    }
}

/// Combined configuration (defaults, then global, then project)
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration relative to the current directory
    pub fn load() -> Result<Self> {
        let start = std::env::current_dir().context("Failed to resolve current directory")?;
        Self::for_path(&start)
    }

    /// Loads configuration for a file or directory
    ///
    /// The project config is searched upward from `path` (or its parent
    /// when `path` is a file).
    pub fn for_path(path: &Path) -> Result<Self> {
        let start = if path.is_dir() {
            path.to_path_buf()
        } else {
            match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        };
        // Bare relative names like "todo.md" have no walkable parent until
        // resolved against the working directory.
        let start = start.canonicalize().unwrap_or(start);

        let mut settings = Settings::default();

        if let Some(config_dir) = Self::global_config_dir() {
            if let Some(overlay) = read_overlay(&config_dir.join("config.toml"))? {
                overlay.apply(&mut settings);
            }
        }

        let project_root = Self::find_project_root(&start);
        if let Some(root) = &project_root {
            if let Some(overlay) = read_overlay(&root.join(CONFIG_FILE_NAME))? {
                overlay.apply(&mut settings);
            }
        }

        Ok(Self {
            settings,
            project_root,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ticktidy", "ticktidy").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Finds the project root by looking for `.ticktidy.toml` upward from
    /// `start`
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(CONFIG_FILE_NAME).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Writes a default `.ticktidy.toml` into `dir`
    ///
    /// Returns the file path and whether a new file was created; an
    /// existing config is left untouched.
    pub fn init_at(dir: &Path) -> Result<(PathBuf, bool)> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Ok((path, false));
        }

        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        fs::write(&path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        Ok((path, true))
    }
}

/// Reads one config layer, if the file exists
fn read_overlay(path: &Path) -> Result<Option<SettingsOverlay>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let overlay = toml::from_str(&content)
        .map_err(|e| ConfigError::Parse(e.to_string()))
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;

    Ok(Some(overlay))
}

/// Template written by `ticktidy init`
const DEFAULT_CONFIG: &str = r#"# ticktidy configuration

# Status markers in the order they should appear.
sort_order = " /x-"

# "runs" sorts each contiguous checklist block independently;
# "document" sorts every checklist line in the file as one group.
scope = "runs"

# Minimum milliseconds between two resorts of the same document.
guard_window_ms = 100

# Debounce for filesystem events in watch mode.
debounce_ms = 250
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.sort_order, SortOrder::new(" /x-"));
        assert_eq!(settings.scope, SortScope::Runs);
        assert_eq!(settings.guard_window_ms, 100);
        assert_eq!(settings.debounce_ms, 250);
    }

    #[test]
    fn parse_full_settings() {
        let toml = r#"
sort_order = "x "
scope = "document"
guard_window_ms = 50
debounce_ms = 500
"#;

        let settings: Settings = toml::from_str(toml).unwrap();
        assert_eq!(settings.sort_order, SortOrder::new("x "));
        assert_eq!(settings.scope, SortScope::Document);
        assert_eq!(settings.guard_window_ms, 50);
        assert_eq!(settings.debounce_ms, 500);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str(r#"sort_order = "x-""#).unwrap();
        assert_eq!(settings.sort_order, SortOrder::new("x-"));
        assert_eq!(settings.guard_window_ms, 100);
    }

    #[test]
    fn project_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"sort_order = "-x ""#).unwrap();

        let config = Config::for_path(dir.path()).unwrap();
        assert_eq!(config.settings.sort_order, SortOrder::new("-x "));
        assert_eq!(config.settings.guard_window_ms, 100);
        assert_eq!(
            config.project_root.as_deref().and_then(|p| p.canonicalize().ok()),
            dir.path().canonicalize().ok()
        );
    }

    #[test]
    fn find_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "").unwrap();

        let nested = dir.path().join("notes").join("daily");
        fs::create_dir_all(&nested).unwrap();

        let root = Config::find_project_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn no_config_means_no_root() {
        let dir = TempDir::new().unwrap();
        let config = Config::for_path(dir.path()).unwrap();
        assert_eq!(config.project_root, None);
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn init_writes_parseable_defaults() {
        let dir = TempDir::new().unwrap();

        let (path, created) = Config::init_at(dir.path()).unwrap();
        assert!(created);

        let content = fs::read_to_string(&path).unwrap();
        let settings: Settings = toml::from_str(&content).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), r#"sort_order = "x""#).unwrap();

        let (_, created) = Config::init_at(dir.path()).unwrap();
        assert!(!created);

        // Existing settings survive.
        let config = Config::for_path(dir.path()).unwrap();
        assert_eq!(config.settings.sort_order, SortOrder::new("x"));
    }
}
