//! Base packages the shell setup depends on.

use crate::error::Result;
use crate::reconcile::presence::{any_present, Presence};

use super::procedure::Procedure;
use super::{Installable, InstallerContext};

const PACKAGES: [&str; 3] = ["zsh", "git", "curl"];

/// zsh, git, and curl, installed as one package transaction.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prerequisites;

impl Prerequisites {
    fn missing(&self, ictx: &InstallerContext<'_>) -> Vec<&'static str> {
        PACKAGES
            .iter()
            .copied()
            .filter(|&pkg| !any_present(&[Presence::Package(pkg), Presence::Executable(pkg)], ictx))
            .collect()
    }
}

impl Installable for Prerequisites {
    fn name(&self) -> &str {
        "zsh, git, curl"
    }

    fn is_present(&self, ictx: &InstallerContext<'_>) -> bool {
        self.missing(ictx).is_empty()
    }

    fn install(&self, ictx: &InstallerContext<'_>) -> Result<()> {
        Procedure::Packages(self.missing(ictx)).run(ictx)
    }

    fn plan(&self, ictx: &InstallerContext<'_>) -> String {
        Procedure::Packages(self.missing(ictx)).describe(ictx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_support::Harness;
    use crate::shell::MockOutcome;

    #[test]
    fn present_when_packages_installed() {
        let h = Harness::arch();
        assert!(Prerequisites.is_present(&h.ctx()));
    }

    #[test]
    fn installs_only_missing_packages() {
        let h = Harness::arch().with_runner(|r| r.on("pacman -Qi zsh", MockOutcome::Fail(1)));
        let ictx = h.ctx();

        Prerequisites.install(&ictx).unwrap();

        assert!(h.runner.was_called("pacman -S --needed --noconfirm zsh"));
        assert!(!h.runner.was_called("--noconfirm zsh git"));
    }

    #[test]
    fn executable_on_path_counts_as_installed() {
        let h = Harness::arch()
            .with_executable("zsh")
            .with_runner(|r| r.on("pacman -Qi zsh", MockOutcome::Fail(1)));
        assert!(Prerequisites.is_present(&h.ctx()));
    }
}
