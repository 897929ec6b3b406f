//! Configuration types for Halo.
//!
//! The host configuration file is optional. It lets the user seed keybind
//! overrides and the content-protection fallback without going through the
//! UI layer.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::shortcuts::{KeybindOverrides, overrides_from_pairs};

/// Root configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HaloConfig {
    /// Action name to accelerator, e.g. `"toggleVisibility": "Cmd+Shift+H"`.
    ///
    /// Applied on top of the platform defaults and below the overrides the
    /// UI stores. An empty accelerator clears the binding.
    pub keybinds: BTreeMap<String, String>,

    /// Content protection to use when the UI has no stored preference.
    pub content_protection: bool,
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            keybinds: BTreeMap::new(),
            content_protection: true,
        }
    }
}

impl HaloConfig {
    /// Keybind overrides with unknown action names dropped.
    #[must_use]
    pub fn keybind_overrides(&self) -> KeybindOverrides {
        overrides_from_pairs(
            self.keybinds.iter().map(|(name, accel)| (name.as_str(), accel.as_str())),
        )
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "no configuration file found, expected at ~/.config/halo/config.jsonc or ~/.halo.jsonc"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".halo.jsonc", ".halo.json"];

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/halo/config.jsonc` or `config.json`, if set
/// 2. `~/.config/halo/config.jsonc` or `config.json`
/// 3. the platform config directory, e.g. `~/Library/Application Support/halo/`
/// 4. `~/.halo.jsonc` or `~/.halo.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut dirs_to_search = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        dirs_to_search.push(PathBuf::from(xdg_config).join("halo"));
    }
    if let Some(home) = dirs::home_dir() {
        dirs_to_search.push(home.join(".config").join("halo"));
    }
    if let Some(config_dir) = dirs::config_dir() {
        dirs_to_search.push(config_dir.join("halo"));
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    for dir in dirs_to_search {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME is often ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Parses JSONC configuration text from `reader`.
///
/// # Errors
///
/// Returns `ConfigError::Parse` if the content is not valid JSON once comments
/// are stripped.
pub fn parse_config(reader: impl Read) -> Result<HaloConfig, ConfigError> {
    let reader = json_comments::StripComments::new(reader);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::Io` if it cannot be read, or `ConfigError::Parse` if it is
/// not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<(HaloConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }
    let file = fs::File::open(path)?;
    Ok((parse_config(file)?, path.to_path_buf()))
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, or the error from [`load_config_from_path`] for
/// the first file that exists.
pub fn load_config() -> Result<(HaloConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}
