//! zsh plugins.
//!
//! A plugin is either bundled with oh-my-zsh (declared in the rc file, nothing
//! to install) or external (shallow-cloned into `$ZSH_CUSTOM/plugins/<name>`).

use crate::error::Result;

use super::procedure::Procedure;
use super::{Installable, InstallerContext};

/// Where a plugin's code comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSource {
    /// Ships with the framework.
    Bundled,
    /// Cloned from a git URL.
    Git(String),
}

/// One zsh plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZshPlugin {
    pub name: String,
    pub source: PluginSource,
}

impl ZshPlugin {
    pub fn bundled(name: &str) -> Self {
        Self {
            name: name.to_string(),
            source: PluginSource::Bundled,
        }
    }

    pub fn git(name: &str, repo: &str) -> Self {
        Self {
            name: name.to_string(),
            source: PluginSource::Git(repo.to_string()),
        }
    }

    /// Whether rigup needs to fetch anything for this plugin.
    pub fn is_external(&self) -> bool {
        matches!(self.source, PluginSource::Git(_))
    }

    fn procedure(&self, ictx: &InstallerContext<'_>) -> Option<Procedure> {
        match &self.source {
            PluginSource::Bundled => None,
            PluginSource::Git(repo) => Some(Procedure::GitClone {
                repo: repo.clone(),
                dest: ictx.run.plugins_dir().join(&self.name),
            }),
        }
    }
}

impl Installable for ZshPlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_present(&self, ictx: &InstallerContext<'_>) -> bool {
        match self.source {
            PluginSource::Bundled => true,
            PluginSource::Git(_) => ictx.run.plugins_dir().join(&self.name).is_dir(),
        }
    }

    fn install(&self, ictx: &InstallerContext<'_>) -> Result<()> {
        match self.procedure(ictx) {
            Some(procedure) => procedure.run(ictx),
            None => Ok(()),
        }
    }

    fn plan(&self, ictx: &InstallerContext<'_>) -> String {
        match self.procedure(ictx) {
            Some(procedure) => procedure.describe(ictx),
            None => format!("{} is bundled with oh-my-zsh", self.name),
        }
    }
}

/// The plugin set used when no config file overrides it, in declaration order.
pub fn default_plugins() -> Vec<ZshPlugin> {
    vec![
        ZshPlugin::bundled("git"),
        ZshPlugin::git(
            "zsh-autosuggestions",
            "https://github.com/zsh-users/zsh-autosuggestions",
        ),
        ZshPlugin::git(
            "zsh-syntax-highlighting",
            "https://github.com/zsh-users/zsh-syntax-highlighting",
        ),
    ]
}
