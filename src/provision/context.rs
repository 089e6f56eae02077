//! Per-run context threaded through every component.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::host::Profile;

/// Default ceiling for network-bound steps (installer scripts, clones).
pub const DEFAULT_NETWORK_TIMEOUT: Duration = Duration::from_secs(60);

/// Default ceiling for package-manager transactions.
pub const DEFAULT_PACKAGE_TIMEOUT: Duration = Duration::from_secs(600);

/// Facts and paths fixed for the duration of one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Classified host profile.
    pub profile: Profile,
    /// User whose environment is being provisioned.
    pub user: String,
    /// That user's home directory.
    pub home: PathBuf,
    /// oh-my-zsh install directory (`$ZSH`).
    pub zsh_dir: PathBuf,
    /// oh-my-zsh custom directory (`$ZSH_CUSTOM`).
    pub zsh_custom: PathBuf,
    /// Shell startup file to patch.
    pub zshrc: PathBuf,
    /// Ceiling for network-bound steps.
    pub network_timeout: Duration,
    /// Ceiling for package-manager transactions.
    pub package_timeout: Duration,
    /// Running as root (no sudo prefix needed).
    pub elevated: bool,
    /// Report what would happen without changing anything.
    pub dry_run: bool,
    /// Directories searched for executables. `None` means the process PATH.
    pub search_path: Option<OsString>,
}

impl RunContext {
    /// Context with default paths under `home`.
    pub fn new(profile: Profile, user: &str, home: &Path) -> Self {
        let zsh_dir = home.join(".oh-my-zsh");
        Self {
            profile,
            user: user.to_string(),
            home: home.to_path_buf(),
            zsh_custom: zsh_dir.join("custom"),
            zsh_dir,
            zshrc: home.join(".zshrc"),
            network_timeout: DEFAULT_NETWORK_TIMEOUT,
            package_timeout: DEFAULT_PACKAGE_TIMEOUT,
            elevated: false,
            dry_run: false,
            search_path: None,
        }
    }

    /// Override the framework directory. The custom directory follows it
    /// unless overridden separately afterwards.
    pub fn with_zsh_dir(mut self, dir: PathBuf) -> Self {
        self.zsh_custom = dir.join("custom");
        self.zsh_dir = dir;
        self
    }

    /// Override the plugin install root.
    pub fn with_zsh_custom(mut self, dir: PathBuf) -> Self {
        self.zsh_custom = dir;
        self
    }

    /// Override the shell startup file.
    pub fn with_zshrc(mut self, path: PathBuf) -> Self {
        self.zshrc = path;
        self
    }

    /// Set the network ceiling.
    pub fn with_network_timeout(mut self, timeout: Duration) -> Self {
        self.network_timeout = timeout;
        self
    }

    /// Set the package-manager ceiling.
    pub fn with_package_timeout(mut self, timeout: Duration) -> Self {
        self.package_timeout = timeout;
        self
    }

    /// Mark the run as elevated (root).
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Toggle dry-run.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Look executables up in `paths` instead of the process PATH.
    pub fn with_search_path(mut self, paths: impl Into<OsString>) -> Self {
        self.search_path = Some(paths.into());
        self
    }

    /// Running as root on behalf of another account.
    pub fn acts_for_other_user(&self) -> bool {
        self.elevated && self.user != "root"
    }

    /// Resolve an executable the way the target shell would.
    pub fn find_executable(&self, name: &str) -> Option<PathBuf> {
        match &self.search_path {
            Some(paths) => which::which_in(name, Some(paths), &self.home).ok(),
            None => which::which(name).ok(),
        }
    }

    /// Where external plugins are cloned.
    pub fn plugins_dir(&self) -> PathBuf {
        self.zsh_custom.join("plugins")
    }

    /// Resolve a path relative to the user's home.
    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_under_home() {
        let ctx = RunContext::new(Profile::DebianFamily, "dev", Path::new("/home/dev"));
        assert_eq!(ctx.zsh_dir, PathBuf::from("/home/dev/.oh-my-zsh"));
        assert_eq!(ctx.plugins_dir(), PathBuf::from("/home/dev/.oh-my-zsh/custom/plugins"));
        assert_eq!(ctx.zshrc, PathBuf::from("/home/dev/.zshrc"));
        assert_eq!(ctx.network_timeout, Duration::from_secs(60));
    }

    #[test]
    fn zsh_custom_override_moves_plugins_dir() {
        let ctx = RunContext::new(Profile::ArchFamily, "dev", Path::new("/home/dev"))
            .with_zsh_custom(PathBuf::from("/opt/zsh-custom"));
        assert_eq!(ctx.plugins_dir(), PathBuf::from("/opt/zsh-custom/plugins"));
    }

    #[test]
    fn zsh_dir_override_carries_custom_dir() {
        let ctx = RunContext::new(Profile::ArchFamily, "dev", Path::new("/home/dev"))
            .with_zsh_dir(PathBuf::from("/srv/omz"));
        assert_eq!(ctx.zsh_custom, PathBuf::from("/srv/omz/custom"));
    }

    #[test]
    fn search_path_limits_executable_lookup() {
        let temp = tempfile::TempDir::new().unwrap();
        let ctx = RunContext::new(Profile::ArchFamily, "dev", temp.path())
            .with_search_path(temp.path().join("bin"));
        assert!(ctx.find_executable("sh").is_none());
    }

    #[test]
    fn root_acting_for_root_is_not_other_user() {
        let home = Path::new("/root");
        assert!(!RunContext::new(Profile::ArchFamily, "root", home)
            .with_elevated(true)
            .acts_for_other_user());
        assert!(RunContext::new(Profile::ArchFamily, "dev", home)
            .with_elevated(true)
            .acts_for_other_user());
        assert!(!RunContext::new(Profile::ArchFamily, "dev", home).acts_for_other_user());
    }

    #[test]
    fn home_path_joins() {
        let ctx = RunContext::new(Profile::ArchFamily, "dev", Path::new("/home/dev"));
        assert_eq!(ctx.home_path(".nvm/nvm.sh"), PathBuf::from("/home/dev/.nvm/nvm.sh"));
    }
}
