//! Arch-family package manager.

use std::time::Duration;

use crate::error::Result;
use crate::shell::{run_checked, succeeds, CommandRunner, CommandSpec};

use super::PackageManager;

/// pacman wrapper.
pub struct Pacman<'a> {
    runner: &'a dyn CommandRunner,
    elevated: bool,
    timeout: Duration,
}

impl<'a> Pacman<'a> {
    /// Create a pacman wrapper. Mutating verbs run through `sudo` unless `elevated`.
    pub fn new(runner: &'a dyn CommandRunner, elevated: bool, timeout: Duration) -> Self {
        Self {
            runner,
            elevated,
            timeout,
        }
    }

    fn pacman(&self, args: &[&str]) -> CommandSpec {
        CommandSpec::new("pacman")
            .args(args.iter().copied())
            .timeout(self.timeout)
            .privileged(self.elevated)
    }
}

impl PackageManager for Pacman<'_> {
    fn name(&self) -> &'static str {
        "pacman"
    }

    fn query_installed(&self, package: &str) -> bool {
        succeeds(self.runner, &CommandSpec::new("pacman").args(["-Qi", package]))
    }

    /// Arch does not support installing against a refreshed database
    /// without upgrading, so the refresh is a full `-Syu`.
    fn update_index(&self) -> Result<()> {
        run_checked(self.runner, &self.pacman(&["-Syu", "--noconfirm"]))?;
        Ok(())
    }

    fn install_many(&self, packages: &[&str]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        let mut args = vec!["-S", "--needed", "--noconfirm"];
        args.extend_from_slice(packages);
        run_checked(self.runner, &self.pacman(&args))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockOutcome, MockRunner};

    fn pacman(runner: &MockRunner) -> Pacman<'_> {
        Pacman::new(runner, false, Duration::from_secs(600))
    }

    #[test]
    fn query_installed_uses_exit_code() {
        let runner = MockRunner::new().on("pacman -Qi docker", MockOutcome::Fail(1));
        let pm = pacman(&runner);

        assert!(pm.query_installed("zsh"));
        assert!(!pm.query_installed("docker"));
    }

    #[test]
    fn query_is_not_privileged() {
        let runner = MockRunner::new();
        pacman(&runner).query_installed("zsh");
        assert_eq!(runner.calls(), vec!["pacman -Qi zsh"]);
    }

    #[test]
    fn update_index_syncs_and_upgrades() {
        let runner = MockRunner::new();
        pacman(&runner).update_index().unwrap();
        assert_eq!(runner.calls(), vec!["sudo -n pacman -Syu --noconfirm"]);
    }

    #[test]
    fn install_many_skips_already_installed() {
        let runner = MockRunner::new();
        pacman(&runner).install_many(&["docker", "nginx"]).unwrap();
        assert!(runner.was_called("pacman -S --needed --noconfirm docker nginx"));
    }

    #[test]
    fn install_failure_propagates() {
        let runner = MockRunner::new().on("pacman -S ", MockOutcome::Fail(1));
        assert!(pacman(&runner).install_many(&["nope"]).is_err());
    }
}
