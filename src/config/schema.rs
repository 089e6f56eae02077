//! Configuration schema for `config.yml`.
//!
//! Every key is optional; an empty file and a missing file both mean the
//! built-in defaults.

use serde::{Deserialize, Serialize};

use crate::install::{default_plugins, ZshPlugin};
use crate::zshrc::default_settings;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigupConfig {
    /// Plugins to install and declare. Replaces the built-in list when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Vec<PluginConfig>>,

    /// Lines of the managed settings block. Replaces the built-in lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_settings: Option<Vec<String>>,

    /// Ceiling in seconds for network-bound steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// oh-my-zsh installer location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_url: Option<String>,
}

/// One plugin entry. Without `repo` the plugin ships with oh-my-zsh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

impl From<&PluginConfig> for ZshPlugin {
    fn from(config: &PluginConfig) -> Self {
        match &config.repo {
            Some(repo) => ZshPlugin::git(&config.name, repo),
            None => ZshPlugin::bundled(&config.name),
        }
    }
}

impl RigupConfig {
    /// Configured plugins, or the built-in list.
    pub fn plugins(&self) -> Vec<ZshPlugin> {
        match &self.plugins {
            Some(list) => list.iter().map(ZshPlugin::from).collect(),
            None => default_plugins(),
        }
    }

    /// Configured settings block, or the built-in lines.
    pub fn settings(&self) -> Vec<String> {
        self.extra_settings.clone().unwrap_or_else(default_settings)
    }
}
