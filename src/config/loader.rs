//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::RigupConfig;
use crate::error::{RigupError, Result};

/// The per-user config location: `~/.config/rigup/config.yml`.
pub fn default_config_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(".config").join("rigup").join("config.yml"))
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid or has unknown keys.
pub fn load_config_file(path: &Path) -> Result<RigupConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RigupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RigupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content. `source_path` is only used in errors.
pub fn parse_config(content: &str, source_path: &Path) -> Result<RigupConfig> {
    if content.trim().is_empty() {
        return Ok(RigupConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| RigupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit path must exist. Without one, the per-user file is read when
/// present and the built-in defaults apply otherwise.
pub fn load_config(config_override: Option<&Path>) -> Result<RigupConfig> {
    load_config_from(config_override, default_config_path().as_deref())
}

fn load_config_from(config_override: Option<&Path>, default: Option<&Path>) -> Result<RigupConfig> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }
    match default {
        Some(path) if path.is_file() => {
            tracing::debug!("loading config from {}", path.display());
            load_config_file(path)
        }
        _ => Ok(RigupConfig::default()),
    }
}
