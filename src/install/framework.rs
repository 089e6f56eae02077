//! oh-my-zsh framework installer.

use crate::error::Result;

use super::procedure::{Procedure, RemoteScript};
use super::{Criticality, Installable, InstallerContext};

/// Upstream unattended installer.
pub const DEFAULT_FRAMEWORK_URL: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// The oh-my-zsh framework. A failed install aborts the run, since every
/// later step writes into its directory.
#[derive(Debug, Clone)]
pub struct OhMyZsh {
    url: String,
}

impl Default for OhMyZsh {
    fn default() -> Self {
        Self::new(DEFAULT_FRAMEWORK_URL)
    }
}

impl OhMyZsh {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    fn procedure(&self, ictx: &InstallerContext<'_>) -> Procedure {
        // Keep the installer from exec'ing zsh, running chsh, or replacing
        // the user's existing rc file; rigup does those itself.
        Procedure::RemoteScript(
            RemoteScript::new(&self.url)
                .args(["--unattended"])
                .env("RUNZSH", "no")
                .env("CHSH", "no")
                .env("KEEP_ZSHRC", "yes")
                .env("ZSH", ictx.run.zsh_dir.to_string_lossy().into_owned()),
        )
    }
}

impl Installable for OhMyZsh {
    fn name(&self) -> &str {
        "oh-my-zsh"
    }

    fn criticality(&self) -> Criticality {
        Criticality::Fatal
    }

    fn is_present(&self, ictx: &InstallerContext<'_>) -> bool {
        ictx.run.zsh_dir.join("oh-my-zsh.sh").is_file()
    }

    fn install(&self, ictx: &InstallerContext<'_>) -> Result<()> {
        self.procedure(ictx).run(ictx)
    }

    fn plan(&self, ictx: &InstallerContext<'_>) -> String {
        self.procedure(ictx).describe(ictx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_support::Harness;
    use crate::shell::MockOutcome;
    use std::fs;

    #[test]
    fn present_when_loader_script_exists() {
        let h = Harness::debian();
        let omz = OhMyZsh::default();
        assert!(!omz.is_present(&h.ctx()));

        fs::create_dir_all(&h.run.zsh_dir).unwrap();
        fs::write(h.run.zsh_dir.join("oh-my-zsh.sh"), "").unwrap();
        assert!(omz.is_present(&h.ctx()));
    }

    #[test]
    fn is_fatal() {
        assert_eq!(OhMyZsh::default().criticality(), Criticality::Fatal);
    }

    #[test]
    fn installs_unattended() {
        let h = Harness::debian().with_script(DEFAULT_FRAMEWORK_URL, "#!/bin/sh\n");
        OhMyZsh::default().install(&h.ctx()).unwrap();
        assert!(h.runner.was_called("--unattended"));
    }

    #[test]
    fn custom_url_is_used() {
        let h = Harness::arch().with_script("https://mirror.test/omz.sh", "#!/bin/sh\n");
        OhMyZsh::new("https://mirror.test/omz.sh")
            .install(&h.ctx())
            .unwrap();
        assert_eq!(h.runner.calls().len(), 1);
    }

    #[test]
    fn installer_failure_is_error() {
        let h = Harness::debian()
            .with_script(DEFAULT_FRAMEWORK_URL, "exit 1")
            .with_runner(|r| r.on("--unattended", MockOutcome::Fail(1)));
        assert!(OhMyZsh::default().install(&h.ctx()).is_err());
    }

    #[test]
    fn plan_names_url() {
        let h = Harness::debian();
        assert!(OhMyZsh::default().plan(&h.ctx()).contains("ohmyzsh/ohmyzsh"));
    }
}
