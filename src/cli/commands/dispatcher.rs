//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands, SetupArgs};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// Fatal preconditions (unsupported host, bad config, invalid menu
    /// preset) come back as `Err`; fatal steps come back as a failed
    /// [`CommandResult`] after the summary has been shown.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command. No subcommand means `setup`.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = cli.config.as_deref();
        match &cli.command {
            Some(Commands::Setup(args)) => {
                super::setup::SetupCommand::new(config, &cli.os_release, args.clone()).execute(ui)
            }
            Some(Commands::Tools(args)) => {
                super::tools::ToolsCommand::new(config, &cli.os_release, args.clone()).execute(ui)
            }
            Some(Commands::Probe) => super::probe::ProbeCommand::new(&cli.os_release).execute(ui),
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::setup::SetupCommand::new(config, &cli.os_release, SetupArgs::from_env())
                .execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatches_probe() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("os-release");
        fs::write(&path, "ID=debian\n").unwrap();
        let cli = Cli::parse_from(["rigup", "probe", "--os-release", path.to_str().unwrap()]);
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new().dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("apt"));
    }

    #[test]
    fn default_command_is_setup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("os-release");
        fs::write(&path, "ID=plan9\n").unwrap();
        let cli = Cli::parse_from(["rigup", "--os-release", path.to_str().unwrap()]);
        let mut ui = MockUI::new();

        // setup refuses unknown hosts before doing anything
        let err = CommandDispatcher::new().dispatch(&cli, &mut ui).unwrap_err();
        assert!(matches!(err, crate::error::RigupError::UnsupportedHost { .. }));
    }
}
