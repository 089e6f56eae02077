//! The uniform install contract.
//!
//! Every tool, plugin, and framework rigup manages implements [`Installable`]:
//! it can say whether it is already present, install itself, and declare
//! whether its failure should stop the run.

pub mod framework;
pub mod plugin;
pub mod prereq;
pub mod procedure;
pub mod remote;

pub use framework::OhMyZsh;
pub use plugin::{default_plugins, PluginSource, ZshPlugin};
pub use prereq::Prerequisites;
pub use procedure::{Procedure, RemoteScript};
pub use remote::{Fetcher, HttpFetcher, StaticFetcher};

use crate::error::Result;
use crate::packages::PackageManager;
use crate::provision::RunContext;
use crate::shell::CommandRunner;

/// Whether a failed install stops the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    /// Failure aborts the run with exit 1.
    Fatal,
    /// Failure is recorded and the run continues.
    Recoverable,
}

/// Everything an installer may touch.
pub struct InstallerContext<'a> {
    pub run: &'a RunContext,
    pub runner: &'a dyn CommandRunner,
    pub packages: Box<dyn PackageManager + 'a>,
    pub fetcher: &'a dyn Fetcher,
}

impl std::fmt::Debug for InstallerContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallerContext")
            .field("run", &self.run)
            .field("packages", &self.packages.name())
            .finish_non_exhaustive()
    }
}

/// Something rigup can detect and install.
pub trait Installable {
    /// Display name, also the reconciler cache key.
    fn name(&self) -> &str;

    /// Whether a failed install aborts the run.
    fn criticality(&self) -> Criticality {
        Criticality::Recoverable
    }

    /// Whether the item is already on this host.
    fn is_present(&self, ictx: &InstallerContext<'_>) -> bool;

    /// Install the item.
    fn install(&self, ictx: &InstallerContext<'_>) -> Result<()>;

    /// Follow-up actions after a successful install. Returns warnings for
    /// anything that did not work; these never fail the item.
    fn post_install(&self, _ictx: &InstallerContext<'_>) -> Vec<String> {
        Vec::new()
    }

    /// What `install` would do, for dry runs.
    fn plan(&self, ictx: &InstallerContext<'_>) -> String;
}

#[cfg(test)]
pub(crate) mod test_support {
    //! A temp-home fixture wiring a [`MockRunner`] and [`StaticFetcher`] into
    //! an [`InstallerContext`].

    use std::path::Path;

    use tempfile::TempDir;

    use super::*;
    use crate::host::Profile;
    use crate::packages;
    use crate::shell::MockRunner;

    pub(crate) struct Harness {
        pub dir: TempDir,
        pub runner: MockRunner,
        pub fetcher: StaticFetcher,
        pub run: RunContext,
    }

    impl Harness {
        pub fn new(profile: Profile) -> Self {
            let dir = TempDir::new().unwrap();
            let bin = dir.path().join("bin");
            std::fs::create_dir_all(&bin).unwrap();
            let run = RunContext::new(profile, "dev", dir.path()).with_search_path(bin);
            Self {
                dir,
                runner: MockRunner::new(),
                fetcher: StaticFetcher::new(),
                run,
            }
        }

        pub fn debian() -> Self {
            Self::new(Profile::DebianFamily)
        }

        pub fn arch() -> Self {
            Self::new(Profile::ArchFamily)
        }

        pub fn with_runner(mut self, f: impl FnOnce(MockRunner) -> MockRunner) -> Self {
            self.runner = f(self.runner);
            self
        }

        pub fn with_script(mut self, url: &str, body: &str) -> Self {
            self.fetcher = self.fetcher.with_script(url, body);
            self
        }

        pub fn with_run(mut self, f: impl FnOnce(RunContext) -> RunContext) -> Self {
            self.run = f(self.run);
            self
        }

        /// Put an executable stub named `name` on the search path.
        pub fn with_executable(self, name: &str) -> Self {
            use std::os::unix::fs::PermissionsExt;

            let path = self.dir.path().join("bin").join(name);
            std::fs::write(&path, "#!/bin/sh\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            self
        }

        pub fn home(&self) -> &Path {
            self.dir.path()
        }

        pub fn ctx(&self) -> InstallerContext<'_> {
            let packages = packages::for_profile(
                self.run.profile,
                &self.runner,
                false,
                self.run.package_timeout,
            )
            .expect("harness profiles are supported");
            InstallerContext {
                run: &self.run,
                runner: &self.runner,
                packages,
                fetcher: &self.fetcher,
            }
        }
    }
}
