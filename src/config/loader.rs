//! Configuration loading and discovery for `gridslice.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::GridsliceConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name searched for during discovery
pub const CONFIG_FILE: &str = "gridslice.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse gridslice.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub rows: Option<u32>,
    pub cols: Option<u32>,
    pub fps: Option<u32>,
    pub out: Option<PathBuf>,
    pub scale: Option<u32>,
    pub sheet_columns: Option<u32>,
}

/// Find gridslice.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for gridslice.toml
/// 2. Check XDG_CONFIG_HOME/gridslice/gridslice.toml (or ~/.config/gridslice/gridslice.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find gridslice.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("gridslice").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find gridslice.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a gridslice.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the
/// default configuration.
pub fn load_config(path: Option<&Path>) -> Result<GridsliceConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(GridsliceConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<GridsliceConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: GridsliceConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        tracing::warn!(count = errors.len(), "rejected invalid config");
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. Overriding the row
/// or column count also drops explicit divider positions on that axis.
pub fn merge_cli_overrides(config: &mut GridsliceConfig, overrides: &CliOverrides) {
    if let Some(rows) = overrides.rows {
        config.grid.rows = rows;
        config.grid.horizontal = None;
    }
    if let Some(cols) = overrides.cols {
        config.grid.cols = cols;
        config.grid.vertical = None;
    }
    if let Some(fps) = overrides.fps {
        config.preview.fps = fps;
    }
    if let Some(ref out) = overrides.out {
        config.export.out = out.clone();
    }
    if let Some(scale) = overrides.scale {
        config.export.scale = scale;
    }
    if let Some(columns) = overrides.sheet_columns {
        config.export.sheet_columns = Some(columns);
    }
}

/// Resolve a path relative to the directory holding the config file.
///
/// Absolute paths are returned unchanged.
pub fn resolve_path(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match config_path.parent() {
        Some(root) => root.join(path),
        None => path.to_path_buf(),
    }
}
