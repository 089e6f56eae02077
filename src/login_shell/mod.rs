//! Best-effort switch of the user's login shell to zsh.
//!
//! Strategies are tried in order and the first success wins. When all of
//! them fail the caller gets the exact commands to run by hand; the account
//! database is never edited directly.

pub mod passwd;

pub use passwd::{lookup, PasswdEntry};

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shell::{is_listed_shell, succeeds, CommandRunner, CommandSpec};

/// Default location of the login-shell allow-list.
pub const SHELLS_FILE: &str = "/etc/shells";

// chsh may ask for a password.
const PROMPT_TIMEOUT: Duration = Duration::from_secs(120);

/// What happened to the login shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellChange {
    /// zsh already is the login shell.
    AlreadyDefault,
    /// Changed by the named strategy.
    Changed { strategy: String },
    /// Dry run: would try to change.
    WouldChange,
    /// Every strategy failed; run these by hand.
    Failed { manual: Vec<String> },
}

/// Changes one user's login shell.
pub struct ShellChanger<'a> {
    runner: &'a dyn CommandRunner,
    user: String,
    elevated: bool,
    shells_file: PathBuf,
    env_shell: Option<String>,
}

impl<'a> ShellChanger<'a> {
    pub fn new(runner: &'a dyn CommandRunner, user: &str, elevated: bool) -> Self {
        Self {
            runner,
            user: user.to_string(),
            elevated,
            shells_file: PathBuf::from(SHELLS_FILE),
            env_shell: std::env::var("SHELL").ok(),
        }
    }

    /// Use a different shells allow-list.
    pub fn with_shells_file(mut self, path: &Path) -> Self {
        self.shells_file = path.to_path_buf();
        self
    }

    /// Override the `$SHELL` fallback.
    pub fn with_env_shell(mut self, shell: Option<&str>) -> Self {
        self.env_shell = shell.map(str::to_string);
        self
    }

    /// The user's login shell: passwd record first, then `$SHELL`.
    pub fn current_shell(&self) -> Option<PathBuf> {
        lookup(self.runner, &self.user)
            .map(|entry| entry.shell)
            .or_else(|| self.env_shell.as_ref().map(PathBuf::from))
    }

    /// Whether zsh is an allowed login shell on this host.
    pub fn is_listed(&self, zsh: &Path) -> bool {
        is_listed_shell(&self.shells_file, zsh)
    }

    /// Strategies in the order they are tried, with a display name each.
    pub fn strategies(&self, zsh: &Path) -> Vec<(String, CommandSpec)> {
        let zsh = zsh.to_string_lossy().into_owned();
        let user = self.user.as_str();

        let mut strategies = Vec::with_capacity(3);
        if !self.elevated {
            strategies.push(
                CommandSpec::new("chsh")
                    .args(["-s", zsh.as_str()])
                    .interactive()
                    .timeout(PROMPT_TIMEOUT),
            );
        }
        strategies.push(
            CommandSpec::new("chsh")
                .args(["-s", zsh.as_str(), user])
                .interactive()
                .timeout(PROMPT_TIMEOUT)
                .privileged(self.elevated),
        );
        strategies.push(
            CommandSpec::new("usermod")
                .args(["-s", zsh.as_str(), user])
                .interactive()
                .timeout(PROMPT_TIMEOUT)
                .privileged(self.elevated),
        );

        strategies.into_iter().map(|s| (s.display(), s)).collect()
    }

    /// Commands for the user to run when every strategy failed.
    pub fn manual_commands(&self, zsh: &Path) -> Vec<String> {
        let mut commands = Vec::new();
        if !self.is_listed(zsh) {
            commands.push(format!(
                "echo {} | sudo tee -a {}",
                zsh.display(),
                self.shells_file.display()
            ));
        }
        commands.push(format!("sudo chsh -s {} {}", zsh.display(), self.user));
        commands
    }

    /// Switch the login shell to `zsh`. Never errors; failures come back as
    /// [`ShellChange::Failed`].
    pub fn change(&self, zsh: &Path, dry_run: bool) -> ShellChange {
        if self.current_shell().as_deref().is_some_and(is_zsh) {
            return ShellChange::AlreadyDefault;
        }
        if dry_run {
            return ShellChange::WouldChange;
        }

        for (name, spec) in self.strategies(zsh) {
            tracing::debug!("trying login shell strategy: {}", name);
            if succeeds(self.runner, &spec) {
                return ShellChange::Changed { strategy: name };
            }
        }

        ShellChange::Failed {
            manual: self.manual_commands(zsh),
        }
    }
}

/// Whether a shell path points at zsh.
pub fn is_zsh(shell: &Path) -> bool {
    shell.file_name().is_some_and(|n| n == "zsh")
}
