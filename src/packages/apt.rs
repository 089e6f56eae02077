//! Debian-family package manager.

use std::time::Duration;

use crate::error::Result;
use crate::shell::{run_checked, CommandRunner, CommandSpec};

use super::PackageManager;

/// apt/dpkg wrapper.
pub struct Apt<'a> {
    runner: &'a dyn CommandRunner,
    elevated: bool,
    timeout: Duration,
}

impl<'a> Apt<'a> {
    /// Create an apt wrapper. Mutating verbs run through `sudo` unless `elevated`.
    pub fn new(runner: &'a dyn CommandRunner, elevated: bool, timeout: Duration) -> Self {
        Self {
            runner,
            elevated,
            timeout,
        }
    }

    /// `env DEBIAN_FRONTEND=noninteractive apt-get <args>` so the variable
    /// survives the sudo boundary.
    fn apt_get(&self, args: &[&str]) -> CommandSpec {
        CommandSpec::new("env")
            .arg("DEBIAN_FRONTEND=noninteractive")
            .arg("apt-get")
            .args(args.iter().copied())
            .timeout(self.timeout)
            .privileged(self.elevated)
    }
}

impl PackageManager for Apt<'_> {
    fn name(&self) -> &'static str {
        "apt"
    }

    fn query_installed(&self, package: &str) -> bool {
        let spec = CommandSpec::new("dpkg-query")
            .args(["-W", "-f=${Status}", package]);
        match self.runner.run(&spec) {
            Ok(result) => result.success && result.stdout.contains("install ok installed"),
            Err(_) => false,
        }
    }

    fn update_index(&self) -> Result<()> {
        run_checked(self.runner, &self.apt_get(&["update"]))?;
        Ok(())
    }

    fn install_many(&self, packages: &[&str]) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }
        let mut args = vec!["install", "-y"];
        args.extend_from_slice(packages);
        run_checked(self.runner, &self.apt_get(&args))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RigupError;
    use crate::shell::{MockOutcome, MockRunner};

    fn apt(runner: &MockRunner) -> Apt<'_> {
        Apt::new(runner, false, Duration::from_secs(600))
    }

    #[test]
    fn query_installed_checks_status_text() {
        let runner = MockRunner::new()
            .on("dpkg-query -W -f=${Status} zsh", MockOutcome::Success("install ok installed".into()))
            .on(
                "dpkg-query -W -f=${Status} nginx",
                MockOutcome::Success("deinstall ok config-files".into()),
            )
            .on("dpkg-query", MockOutcome::Fail(1));
        let apt = apt(&runner);

        assert!(apt.query_installed("zsh"));
        assert!(!apt.query_installed("nginx"));
        assert!(!apt.query_installed("docker.io"));
    }

    #[test]
    fn query_installed_missing_dpkg_is_false() {
        let runner = MockRunner::new().with_default(MockOutcome::NotFound);
        assert!(!apt(&runner).query_installed("zsh"));
    }

    #[test]
    fn update_index_uses_sudo_and_noninteractive_frontend() {
        let runner = MockRunner::new();
        apt(&runner).update_index().unwrap();

        assert_eq!(
            runner.calls(),
            vec!["sudo -n env DEBIAN_FRONTEND=noninteractive apt-get update"]
        );
    }

    #[test]
    fn update_index_failure_is_error() {
        let runner = MockRunner::new().on("apt-get update", MockOutcome::Fail(100));
        let err = apt(&runner).update_index().unwrap_err();
        assert!(matches!(err, RigupError::CommandFailed { code: Some(100), .. }));
    }

    #[test]
    fn install_many_is_one_transaction() {
        let runner = MockRunner::new();
        apt(&runner).install_many(&["zsh", "git", "curl"]).unwrap();

        assert_eq!(runner.calls().len(), 1);
        assert!(runner.was_called("apt-get install -y zsh git curl"));
    }

    #[test]
    fn install_many_empty_is_noop() {
        let runner = MockRunner::new();
        apt(&runner).install_many(&[]).unwrap();
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn elevated_skips_sudo() {
        let runner = MockRunner::new();
        Apt::new(&runner, true, Duration::from_secs(1))
            .update_index()
            .unwrap();
        assert!(runner.calls()[0].starts_with("env "));
    }
}
