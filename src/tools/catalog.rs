//! The menu's developer tools.
//!
//! Each [`Tool`] carries its menu number, a per-profile install procedure,
//! and the presence checks the reconciler evaluates before installing.

use std::fmt;

use crate::error::Result;
use crate::host::Profile;
use crate::install::{Installable, InstallerContext, Procedure, RemoteScript};
use crate::reconcile::presence::{any_present, Presence};
use crate::shell::{run_checked, CommandSpec};

const NVM_URL: &str = "https://raw.githubusercontent.com/nvm-sh/nvm/v0.40.1/install.sh";
const PYENV_URL: &str = "https://pyenv.run";
const RUSTUP_URL: &str = "https://sh.rustup.rs";
const SDKMAN_URL: &str = "https://get.sdkman.io?rcupdate=false";

/// A developer tool offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tool {
    Docker,
    Nginx,
    Nvm,
    Pyenv,
    Rustup,
    Sdkman,
    BuildTools,
    Neovim,
    Tmux,
}

impl Tool {
    /// Every tool in menu order.
    pub const ALL: [Tool; 9] = [
        Tool::Docker,
        Tool::Nginx,
        Tool::Nvm,
        Tool::Pyenv,
        Tool::Rustup,
        Tool::Sdkman,
        Tool::BuildTools,
        Tool::Neovim,
        Tool::Tmux,
    ];

    /// 1-based menu number.
    pub fn number(self) -> u8 {
        match self {
            Tool::Docker => 1,
            Tool::Nginx => 2,
            Tool::Nvm => 3,
            Tool::Pyenv => 4,
            Tool::Rustup => 5,
            Tool::Sdkman => 6,
            Tool::BuildTools => 7,
            Tool::Neovim => 8,
            Tool::Tmux => 9,
        }
    }

    /// Look up a tool by menu number.
    pub fn from_number(n: u8) -> Option<Tool> {
        Tool::ALL.iter().copied().find(|t| t.number() == n)
    }

    pub fn label(self) -> &'static str {
        match self {
            Tool::Docker => "docker",
            Tool::Nginx => "nginx",
            Tool::Nvm => "nvm",
            Tool::Pyenv => "pyenv",
            Tool::Rustup => "rustup",
            Tool::Sdkman => "sdkman",
            Tool::BuildTools => "build-tools",
            Tool::Neovim => "neovim",
            Tool::Tmux => "tmux",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::Docker => "Container runtime",
            Tool::Nginx => "Web server",
            Tool::Nvm => "Node.js version manager",
            Tool::Pyenv => "Python version manager",
            Tool::Rustup => "Rust toolchain installer",
            Tool::Sdkman => "JVM SDK manager",
            Tool::BuildTools => "Compiler toolchain and make",
            Tool::Neovim => "Text editor",
            Tool::Tmux => "Terminal multiplexer",
        }
    }

    /// Distribution package for package-based tools.
    fn package(self, profile: Profile) -> Option<&'static str> {
        let arch = profile == Profile::ArchFamily;
        match self {
            Tool::Docker => Some(if arch { "docker" } else { "docker.io" }),
            Tool::Nginx => Some("nginx"),
            Tool::BuildTools => Some(if arch { "base-devel" } else { "build-essential" }),
            Tool::Neovim => Some("neovim"),
            Tool::Tmux => Some("tmux"),
            Tool::Nvm | Tool::Pyenv | Tool::Rustup | Tool::Sdkman => None,
        }
    }

    fn procedure(self, profile: Profile) -> Procedure {
        let script = match self {
            Tool::Nvm => RemoteScript::new(NVM_URL)
                .interpreter("bash")
                .env("PROFILE", "/dev/null"),
            Tool::Pyenv => RemoteScript::new(PYENV_URL).interpreter("bash"),
            Tool::Rustup => RemoteScript::new(RUSTUP_URL).args(["-y", "--no-modify-path"]),
            Tool::Sdkman => RemoteScript::new(SDKMAN_URL).interpreter("bash"),
            Tool::Docker | Tool::Nginx | Tool::BuildTools | Tool::Neovim | Tool::Tmux => {
                return Procedure::Packages(self.package(profile).into_iter().collect());
            }
        };
        Procedure::RemoteScript(script)
    }

    fn presence(self, profile: Profile) -> Vec<Presence> {
        let mut checks = Vec::new();
        if let Some(pkg) = self.package(profile) {
            checks.push(Presence::Package(pkg));
        }
        match self {
            Tool::Docker => checks.push(Presence::Executable("docker")),
            Tool::Nginx => checks.push(Presence::Executable("nginx")),
            Tool::Nvm => checks.push(Presence::HomePath(".nvm/nvm.sh")),
            Tool::Pyenv => {
                checks.push(Presence::HomePath(".pyenv/bin/pyenv"));
                checks.push(Presence::Executable("pyenv"));
            }
            Tool::Rustup => {
                checks.push(Presence::HomePath(".cargo/bin/rustup"));
                checks.push(Presence::Executable("rustup"));
            }
            Tool::Sdkman => checks.push(Presence::HomePath(".sdkman/bin/sdkman-init.sh")),
            Tool::BuildTools => {}
            Tool::Neovim => checks.push(Presence::Executable("nvim")),
            Tool::Tmux => checks.push(Presence::Executable("tmux")),
        }
        checks
    }

    /// Service to enable after install.
    fn service(self) -> Option<&'static str> {
        match self {
            Tool::Docker => Some("docker"),
            Tool::Nginx => Some("nginx"),
            _ => None,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Installable for Tool {
    fn name(&self) -> &str {
        self.label()
    }

    fn is_present(&self, ictx: &InstallerContext<'_>) -> bool {
        any_present(&self.presence(ictx.run.profile), ictx)
    }

    fn install(&self, ictx: &InstallerContext<'_>) -> Result<()> {
        self.procedure(ictx.run.profile).run(ictx)
    }

    fn post_install(&self, ictx: &InstallerContext<'_>) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(service) = self.service() {
            let spec = CommandSpec::new("systemctl")
                .args(["enable", "--now", service])
                .timeout(ictx.run.network_timeout)
                .privileged(ictx.run.elevated);
            if let Err(e) = run_checked(ictx.runner, &spec) {
                warnings.push(format!("could not enable {} service: {}", service, e));
            }
        }

        if *self == Tool::Docker {
            let spec = CommandSpec::new("usermod")
                .args(["-aG", "docker", ictx.run.user.as_str()])
                .timeout(ictx.run.network_timeout)
                .privileged(ictx.run.elevated);
            if let Err(e) = run_checked(ictx.runner, &spec) {
                warnings.push(format!("could not add {} to the docker group: {}", ictx.run.user, e));
            }
        }

        warnings
    }

    fn plan(&self, ictx: &InstallerContext<'_>) -> String {
        self.procedure(ictx.run.profile).describe(ictx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::test_support::Harness;
    use crate::shell::MockOutcome;

    #[test]
    fn numbers_round_trip() {
        for tool in Tool::ALL {
            assert_eq!(Tool::from_number(tool.number()), Some(tool));
        }
        assert_eq!(Tool::from_number(0), None);
        assert_eq!(Tool::from_number(10), None);
    }

    #[test]
    fn menu_order_matches_ord() {
        let mut sorted = Tool::ALL;
        sorted.sort();
        assert_eq!(sorted, Tool::ALL);
    }

    #[test]
    fn docker_package_differs_by_family() {
        assert_eq!(Tool::Docker.package(Profile::DebianFamily), Some("docker.io"));
        assert_eq!(Tool::Docker.package(Profile::ArchFamily), Some("docker"));
        assert_eq!(Tool::BuildTools.package(Profile::ArchFamily), Some("base-devel"));
    }

    #[test]
    fn script_tools_use_remote_installers() {
        for tool in [Tool::Nvm, Tool::Pyenv, Tool::Rustup, Tool::Sdkman] {
            assert!(matches!(
                tool.procedure(Profile::DebianFamily),
                Procedure::RemoteScript(_)
            ));
        }
    }

    #[test]
    fn rustup_runs_unattended() {
        match Tool::Rustup.procedure(Profile::ArchFamily) {
            Procedure::RemoteScript(script) => assert!(script.args.contains(&"-y".to_string())),
            other => panic!("unexpected procedure {:?}", other),
        }
    }

    #[test]
    fn nvm_present_from_home_marker() {
        let h = Harness::debian();
        assert!(!Tool::Nvm.is_present(&h.ctx()));

        std::fs::create_dir_all(h.home().join(".nvm")).unwrap();
        std::fs::write(h.home().join(".nvm/nvm.sh"), "").unwrap();
        assert!(Tool::Nvm.is_present(&h.ctx()));
    }

    #[test]
    fn package_tool_present_from_database() {
        let h = Harness::arch();
        assert!(Tool::Tmux.is_present(&h.ctx()));
    }

    #[test]
    fn docker_post_install_enables_service() {
        let h = Harness::debian();
        let warnings = Tool::Docker.post_install(&h.ctx());
        assert!(warnings.is_empty());
        assert!(h.runner.was_called("systemctl enable --now docker"));
        assert!(h.runner.was_called("usermod -aG docker dev"));
    }

    #[test]
    fn post_install_failure_is_a_warning() {
        let h = Harness::debian().with_runner(|r| r.on("systemctl", MockOutcome::Fail(1)));
        let warnings = Tool::Nginx.post_install(&h.ctx());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("nginx"));
    }

    #[test]
    fn tools_without_service_have_no_post_install() {
        let h = Harness::debian();
        assert!(Tool::Tmux.post_install(&h.ctx()).is_empty());
        assert!(h.runner.calls().is_empty());
    }
}
