//! Shared per-run setup for the provisioning commands.

use std::path::Path;
use std::time::Duration;

use crate::error::{RigupError, Result};
use crate::host::HostInfo;
use crate::install::{HttpFetcher, InstallerContext};
use crate::login_shell::lookup;
use crate::packages;
use crate::provision::RunContext;
use crate::shell::{current_user, home_dir, is_elevated, CommandRunner, SystemRunner};

/// The probed host plus the live runner and fetcher for one run.
pub struct HostSession {
    pub host: HostInfo,
    pub run: RunContext,
    runner: SystemRunner,
    fetcher: HttpFetcher,
}

impl HostSession {
    /// Probe the host and resolve the target user.
    ///
    /// Fails with [`RigupError::UnsupportedHost`] before anything runs.
    pub fn open(os_release: &Path, network_timeout: Duration) -> Result<Self> {
        let host = HostInfo::detect(os_release);
        if !host.profile.is_supported() {
            return Err(RigupError::UnsupportedHost {
                detail: host.unsupported_detail(),
            });
        }

        let runner = SystemRunner;
        let elevated = is_elevated();
        let user = current_user();
        let home = target_home(&runner, &user, elevated);
        tracing::debug!("provisioning {} (home {}, elevated {})", user, home.display(), elevated);

        let run = RunContext::new(host.profile, &user, &home)
            .with_elevated(elevated)
            .with_network_timeout(network_timeout);
        let fetcher = HttpFetcher::new(network_timeout)?;

        Ok(Self {
            host,
            run,
            runner,
            fetcher,
        })
    }

    /// Borrow everything installers need.
    pub fn installer_context(&self) -> Result<InstallerContext<'_>> {
        let packages = packages::for_profile(
            self.run.profile,
            &self.runner,
            self.run.elevated,
            self.run.package_timeout,
        )
        .ok_or_else(|| RigupError::UnsupportedHost {
            detail: self.host.unsupported_detail(),
        })?;
        Ok(InstallerContext {
            run: &self.run,
            runner: &self.runner,
            packages,
            fetcher: &self.fetcher,
        })
    }
}

/// Under sudo the environment's home is root's, so ask the account database.
fn target_home(runner: &dyn CommandRunner, user: &str, elevated: bool) -> std::path::PathBuf {
    if elevated && user != "root" {
        if let Some(entry) = lookup(runner, user) {
            return entry.home;
        }
    }
    home_dir()
}

/// Network ceiling: CLI flag, then config file, then the built-in default.
pub fn network_timeout(flag: Option<u64>, config: Option<u64>) -> Duration {
    flag.or(config)
        .map(Duration::from_secs)
        .unwrap_or(crate::provision::DEFAULT_NETWORK_TIMEOUT)
}
