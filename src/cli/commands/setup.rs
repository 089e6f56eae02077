//! Setup command implementation.
//!
//! The `rigup setup` command installs zsh, oh-my-zsh and plugins, patches
//! the startup file, and switches the login shell.

use std::path::{Path, PathBuf};

use crate::cli::args::SetupArgs;
use crate::config::{load_config, RigupConfig};
use crate::error::Result;
use crate::install::framework::DEFAULT_FRAMEWORK_URL;
use crate::login_shell::SHELLS_FILE;
use crate::provision::{describe_fatal, run_setup, RunContext, SetupOptions, StepRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::session::{network_timeout, HostSession};

/// The setup command implementation.
pub struct SetupCommand {
    config_path: Option<PathBuf>,
    os_release: PathBuf,
    args: SetupArgs,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(config_path: Option<&Path>, os_release: &Path, args: SetupArgs) -> Self {
        Self {
            config_path: config_path.map(Path::to_path_buf),
            os_release: os_release.to_path_buf(),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &SetupArgs {
        &self.args
    }

    /// Apply path flags on top of the defaults under the user's home.
    fn apply_paths(&self, mut run: RunContext) -> RunContext {
        if let Some(dir) = &self.args.zsh_dir {
            run = run.with_zsh_dir(dir.clone());
        }
        if let Some(dir) = &self.args.zsh_custom {
            run = run.with_zsh_custom(dir.clone());
        }
        if let Some(path) = &self.args.zshrc {
            run = run.with_zshrc(path.clone());
        }
        run.with_dry_run(self.args.dry_run)
    }

    fn build_options(&self, config: &RigupConfig) -> SetupOptions {
        SetupOptions {
            plugins: config.plugins(),
            settings: config.settings(),
            framework_url: config
                .framework_url
                .clone()
                .unwrap_or_else(|| DEFAULT_FRAMEWORK_URL.to_string()),
            skip_shell_change: self.args.skip_shell_change,
            shells_file: PathBuf::from(SHELLS_FILE),
        }
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(self.config_path.as_deref())?;
        let timeout = network_timeout(self.args.timeout, config.timeout_secs);

        let mut session = HostSession::open(&self.os_release, timeout)?;
        session.run = self.apply_paths(session.run.clone());

        ui.show_header(&format!(
            "Setting up zsh for {} on {}",
            session.run.user,
            session.host.display_name()
        ));
        if self.args.dry_run {
            ui.message("Running in dry-run mode - nothing will be installed or written");
        }

        let options = self.build_options(&config);
        let ictx = session.installer_context()?;

        let mut steps = StepRunner::new(ui);
        let outcome = run_setup(&mut steps, &ictx, &options);
        let report = steps.finish();

        match outcome {
            Ok(()) => {
                if report.has_failures() {
                    ui.warning(&format!(
                        "Finished with failures: {}",
                        report.failed_names().join(", ")
                    ));
                } else if !self.args.dry_run {
                    ui.success("zsh setup complete");
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
