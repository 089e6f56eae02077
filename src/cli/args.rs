//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Rigup - zsh and developer tool provisioning for Linux workstations.
#[derive(Debug, Parser)]
#[command(name = "rigup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.config/rigup/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Host identification file to probe
    #[arg(long, global = true, default_value = crate::host::DEFAULT_OS_RELEASE)]
    pub os_release: PathBuf,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install zsh, oh-my-zsh and plugins, then make zsh the login shell
    /// (default if no command specified)
    Setup(SetupArgs),

    /// Pick developer tools from a menu and install them
    Tools(ToolsArgs),

    /// Show the detected distribution and package manager
    Probe,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `setup` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SetupArgs {
    /// Shell startup file to patch (default ~/.zshrc)
    #[arg(long, value_name = "PATH")]
    pub zshrc: Option<PathBuf>,

    /// oh-my-zsh custom directory
    #[arg(long, value_name = "PATH", env = "ZSH_CUSTOM")]
    pub zsh_custom: Option<PathBuf>,

    /// oh-my-zsh install directory
    #[arg(long, value_name = "PATH", env = "ZSH")]
    pub zsh_dir: Option<PathBuf>,

    /// Leave the login shell unchanged
    #[arg(long)]
    pub skip_shell_change: bool,

    /// Ceiling in seconds for downloads and clones
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show what would be installed and edited without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

impl SetupArgs {
    /// Arguments for a bare `rigup` invocation, honoring the same
    /// environment fallbacks as `rigup setup`.
    pub fn from_env() -> Self {
        let var = |key: &str| {
            std::env::var_os(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        };
        Self {
            zsh_custom: var("ZSH_CUSTOM"),
            zsh_dir: var("ZSH"),
            ..Self::default()
        }
    }
}

/// Arguments for the `tools` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ToolsArgs {
    /// Menu answer, e.g. "1 3" or "10" for everything (skips the prompt)
    #[arg(long, value_name = "TOKENS")]
    pub select: Option<String>,

    /// Ceiling in seconds for downloads
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show what would be installed without changing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_command_parses() {
        let cli = Cli::try_parse_from(["rigup"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.os_release, PathBuf::from("/etc/os-release"));
    }

    #[test]
    fn setup_flags_parse() {
        let cli = Cli::try_parse_from([
            "rigup",
            "setup",
            "--zshrc",
            "/tmp/rc",
            "--skip-shell-change",
            "--timeout",
            "30",
            "--dry-run",
        ])
        .unwrap();
        let Some(Commands::Setup(args)) = cli.command else {
            panic!("expected setup");
        };
        assert_eq!(args.zshrc, Some(PathBuf::from("/tmp/rc")));
        assert!(args.skip_shell_change);
        assert_eq!(args.timeout, Some(30));
        assert!(args.dry_run);
    }

    #[test]
    fn tools_select_parses() {
        let cli = Cli::try_parse_from(["rigup", "tools", "--select", "1 3"]).unwrap();
        let Some(Commands::Tools(args)) = cli.command else {
            panic!("expected tools");
        };
        assert_eq!(args.select.as_deref(), Some("1 3"));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["rigup", "probe", "--os-release", "/tmp/os", "--quiet"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Probe)));
        assert_eq!(cli.os_release, PathBuf::from("/tmp/os"));
        assert!(cli.quiet);
    }
}
