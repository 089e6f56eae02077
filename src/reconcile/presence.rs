//! Presence predicates.
//!
//! An item counts as present when any of its predicates holds: the package
//! database reports it installed, an executable of that name resolves on
//! the run's search path, or a marker file exists under the user's home.

use crate::install::InstallerContext;

/// A single "is it already there?" check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presence {
    /// The package manager reports this package installed.
    Package(&'static str),
    /// An executable of this name resolves on the search path.
    Executable(&'static str),
    /// A path relative to the user's home exists.
    HomePath(&'static str),
}

impl Presence {
    /// Evaluate the predicate.
    pub fn check(&self, ictx: &InstallerContext<'_>) -> bool {
        let found = match self {
            Presence::Package(name) => ictx.packages.query_installed(name),
            Presence::Executable(name) => ictx.run.find_executable(name).is_some(),
            Presence::HomePath(rel) => ictx.run.home_path(rel).exists(),
        };
        tracing::debug!("presence {:?}: {}", self, found);
        found
    }
}

/// True if any predicate holds. Evaluation stops at the first hit.
pub fn any_present(checks: &[Presence], ictx: &InstallerContext<'_>) -> bool {
    checks.iter().any(|c| c.check(ictx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_support::Harness;
    use crate::shell::MockOutcome;

    #[test]
    fn package_predicate_queries_manager() {
        let h = Harness::debian().with_runner(|r| {
            r.on("dpkg-query -W -f=${Status} nginx", MockOutcome::Success("install ok installed".into()))
                .on("dpkg-query", MockOutcome::Fail(1))
        });
        let ictx = h.ctx();

        assert!(Presence::Package("nginx").check(&ictx));
        assert!(!Presence::Package("docker.io").check(&ictx));
    }

    #[test]
    fn home_path_predicate_checks_disk() {
        let h = Harness::debian();
        std::fs::create_dir_all(h.home().join(".nvm")).unwrap();
        std::fs::write(h.home().join(".nvm/nvm.sh"), "").unwrap();
        let ictx = h.ctx();

        assert!(Presence::HomePath(".nvm/nvm.sh").check(&ictx));
        assert!(!Presence::HomePath(".pyenv/bin/pyenv").check(&ictx));
    }

    #[test]
    fn executable_predicate_uses_search_path() {
        let h = Harness::debian().with_executable("tmux");
        let ictx = h.ctx();

        assert!(Presence::Executable("tmux").check(&ictx));
        assert!(!Presence::Executable("sh").check(&ictx));
    }

    #[test]
    fn any_present_is_or() {
        let h = Harness::debian()
            .with_executable("docker")
            .with_runner(|r| r.on("dpkg-query", MockOutcome::Fail(1)));
        let ictx = h.ctx();

        let checks = [
            Presence::Package("docker.io"),
            Presence::Executable("docker"),
        ];
        assert!(any_present(&checks, &ictx));
        assert!(!any_present(&[Presence::Package("docker.io")], &ictx));
    }
}
