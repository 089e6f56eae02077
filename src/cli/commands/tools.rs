//! Tools command implementation.
//!
//! The `rigup tools` command shows the numbered tool menu and installs the
//! chosen tools in menu order.

use std::path::{Path, PathBuf};

use crate::cli::args::ToolsArgs;
use crate::config::load_config;
use crate::error::Result;
use crate::provision::{describe_fatal, run_tools, StepRunner};
use crate::tools::{choose_tools, Selection};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::session::{network_timeout, HostSession};

/// The tools command implementation.
pub struct ToolsCommand {
    config_path: Option<PathBuf>,
    os_release: PathBuf,
    args: ToolsArgs,
}

impl ToolsCommand {
    /// Create a new tools command.
    pub fn new(config_path: Option<&Path>, os_release: &Path, args: ToolsArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            os_release: os_release.to_path_buf(),
            args,
        }
    }
}

impl Command for ToolsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(self.config_path.as_deref())?;
        let timeout = network_timeout(self.args.timeout, config.timeout_secs);

        let mut session = HostSession::open(&self.os_release, timeout)?;
        session.run.dry_run = self.args.dry_run;

        let tools = match choose_tools(ui, self.args.select.as_deref())? {
            Selection::Quit => {
                ui.message("Nothing selected");
                return Ok(CommandResult::success());
            }
            Selection::Tools(tools) => tools,
        };

        let names: Vec<&str> = tools.iter().map(|t| t.label()).collect();
        ui.show_header(&format!(
            "Installing {} on {}",
            names.join(", "),
            session.host.display_name()
        ));

        let ictx = session.installer_context()?;
        let mut steps = StepRunner::new(ui);
        let outcome = run_tools(&mut steps, &ictx, &tools);
        let report = steps.finish();

        match outcome {
            Ok(()) => {
                if report.has_failures() {
                    ui.warning(&format!(
                        "Some tools failed: {}",
                        report.failed_names().join(", ")
                    ));
                }
                Ok(CommandResult::success())
            }
            Err(e) => {
                ui.error(&describe_fatal(&e));
                Ok(CommandResult::failure(1))
            }
        }
    }
}
