//! The two end-to-end flows: zsh setup and tool installation.

use std::path::PathBuf;

use crate::error::{RigupError, Result};
use crate::install::{
    default_plugins, framework::DEFAULT_FRAMEWORK_URL, Installable, InstallerContext, OhMyZsh,
    Prerequisites, ZshPlugin,
};
use crate::login_shell::{ShellChange, ShellChanger, SHELLS_FILE};
use crate::shell::{run_checked, CommandSpec};
use crate::tools::Tool;
use crate::zshrc::{default_settings, EditOutcome, ZshrcEditor};

use super::report::ItemOutcome;
use super::steps::StepRunner;

/// Summary name of the startup-file edit.
pub const ZSHRC_STEP: &str = "zshrc";

/// Summary name of the login-shell change.
pub const LOGIN_SHELL_STEP: &str = "login shell";

/// What the setup flow installs and writes.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    pub plugins: Vec<ZshPlugin>,
    pub settings: Vec<String>,
    pub framework_url: String,
    pub skip_shell_change: bool,
    pub shells_file: PathBuf,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            plugins: default_plugins(),
            settings: default_settings(),
            framework_url: DEFAULT_FRAMEWORK_URL.to_string(),
            skip_shell_change: false,
            shells_file: PathBuf::from(SHELLS_FILE),
        }
    }
}

/// Install zsh, the framework, and plugins, patch the startup file, then
/// switch the login shell.
///
/// Returns `Err` for fatal failures: the index refresh, the framework
/// install, and a missing or locked startup file. Everything else is
/// recorded in the report and the flow continues.
pub fn run_setup(
    steps: &mut StepRunner<'_>,
    ictx: &InstallerContext<'_>,
    options: &SetupOptions,
) -> Result<()> {
    steps.ui().show_header("Package index");
    steps.update_index(ictx)?;

    steps.ui().show_header("Prerequisites");
    steps.install_all(&[&Prerequisites], ictx)?;

    steps.ui().show_header("oh-my-zsh");
    let framework = OhMyZsh::new(&options.framework_url);
    steps.install_all(&[&framework], ictx)?;

    steps.ui().show_header("Plugins");
    let external: Vec<&dyn Installable> = options
        .plugins
        .iter()
        .filter(|p| p.is_external())
        .map(|p| p as &dyn Installable)
        .collect();
    if external.is_empty() {
        steps.ui().message("No external plugins configured");
    }
    steps.install_all(&external, ictx)?;

    steps.ui().show_header("Shell configuration");
    configure_zshrc(steps, ictx, options, &framework)?;

    if ictx.run.acts_for_other_user() && !ictx.run.dry_run {
        restore_ownership(steps, ictx);
    }

    if options.skip_shell_change {
        steps.record(
            LOGIN_SHELL_STEP,
            ItemOutcome::Skipped,
            Some("--skip-shell-change".to_string()),
        );
    } else {
        steps.ui().show_header("Login shell");
        change_login_shell(steps, ictx, options);
    }

    if !ictx.run.dry_run {
        steps.ui().show_header("Verification");
        verify_setup(steps, ictx, options);
    }
    Ok(())
}

/// Refresh the index and install the selected tools in menu order.
pub fn run_tools(steps: &mut StepRunner<'_>, ictx: &InstallerContext<'_>, tools: &[Tool]) -> Result<()> {
    steps.ui().show_header("Package index");
    steps.update_index(ictx)?;

    steps.ui().show_header("Developer tools");
    let items: Vec<&dyn Installable> = tools.iter().map(|t| t as &dyn Installable).collect();
    steps.install_all(&items, ictx)
}

/// Plugins to declare: bundled ones plus external ones that are on disk.
/// In a dry run, external plugins count as installed.
fn declared_plugins<'p>(options: &'p SetupOptions, ictx: &InstallerContext<'_>) -> Vec<&'p str> {
    options
        .plugins
        .iter()
        .filter(|p| ictx.run.dry_run || p.is_present(ictx))
        .map(|p| p.name.as_str())
        .collect()
}

fn configure_zshrc(
    steps: &mut StepRunner<'_>,
    ictx: &InstallerContext<'_>,
    options: &SetupOptions,
    framework: &OhMyZsh,
) -> Result<()> {
    let plugins = declared_plugins(options, ictx);
    for skipped in options.plugins.iter().filter(|p| !plugins.contains(&p.name.as_str())) {
        steps.ui().warning(&format!(
            "{} is not installed and was left out of the plugin list",
            skipped.name
        ));
    }

    let editor = ZshrcEditor::new(&ictx.run.zshrc, &plugins, options.settings.clone());

    // The framework installer creates the file, so a dry run on a fresh host
    // cannot expect it yet.
    if ictx.run.dry_run && !ictx.run.zshrc.exists() && !framework.is_present(ictx) {
        steps.ui().message(&format!(
            "Would write {} after the framework creates {}",
            editor.plugin_line(),
            ictx.run.zshrc.display()
        ));
        steps.record(ZSHRC_STEP, ItemOutcome::Planned, None);
        return Ok(());
    }

    match editor.apply(ictx.run.dry_run) {
        Ok(EditOutcome::AlreadyApplied) => {
            steps
                .ui()
                .success(&format!("{} already configured", ictx.run.zshrc.display()));
            steps.record(ZSHRC_STEP, ItemOutcome::AlreadyPresent, None);
            Ok(())
        }
        Ok(EditOutcome::Applied { backup }) => {
            steps
                .ui()
                .success(&format!("Updated {}", ictx.run.zshrc.display()));
            steps.ui().detail(&format!("backup: {}", backup.display()));
            steps.record(
                ZSHRC_STEP,
                ItemOutcome::Installed,
                Some(format!("backup {}", backup.display())),
            );
            Ok(())
        }
        Ok(EditOutcome::WouldApply) => {
            steps.ui().message(&format!(
                "Would back up and update {}",
                ictx.run.zshrc.display()
            ));
            steps.ui().detail(editor.plugin_line());
            steps.record(ZSHRC_STEP, ItemOutcome::Planned, None);
            Ok(())
        }
        Err(e) => Err(steps.abort(ZSHRC_STEP, &e)),
    }
}

/// Files created by a root run go back to the user.
fn restore_ownership(steps: &mut StepRunner<'_>, ictx: &InstallerContext<'_>) {
    let owner = format!("{}:", ictx.run.user);
    let run = ictx.run;
    let custom_outside = !run.zsh_custom.starts_with(&run.zsh_dir);
    let paths = [
        Some(&run.zsh_dir),
        custom_outside.then_some(&run.zsh_custom),
        Some(&run.zshrc),
    ];
    for path in paths.into_iter().flatten() {
        if !path.exists() {
            continue;
        }
        let spec = CommandSpec::new("chown")
            .args(["-R", owner.as_str()])
            .arg(path.to_string_lossy().into_owned());
        if let Err(e) = run_checked(ictx.runner, &spec) {
            steps
                .ui()
                .warning(&format!("Could not hand {} back to {}: {}", path.display(), ictx.run.user, e));
        }
    }
}

fn change_login_shell(steps: &mut StepRunner<'_>, ictx: &InstallerContext<'_>, options: &SetupOptions) {
    let Some(zsh) = ictx.run.find_executable("zsh").or_else(|| ictx.run.dry_run.then(|| PathBuf::from("/usr/bin/zsh")))
    else {
        steps.ui().warning("zsh is not on PATH; login shell left unchanged");
        steps.record(
            LOGIN_SHELL_STEP,
            ItemOutcome::Failed,
            Some("zsh not found".to_string()),
        );
        return;
    };

    let changer = ShellChanger::new(ictx.runner, &ictx.run.user, ictx.run.elevated)
        .with_shells_file(&options.shells_file);

    if !changer.is_listed(&zsh) {
        steps.ui().warning(&format!(
            "{} is not listed in {}; chsh may refuse it",
            zsh.display(),
            options.shells_file.display()
        ));
    }

    match changer.change(&zsh, ictx.run.dry_run) {
        ShellChange::AlreadyDefault => {
            steps.ui().success("zsh is already the login shell");
            steps.record(LOGIN_SHELL_STEP, ItemOutcome::AlreadyPresent, None);
        }
        ShellChange::Changed { strategy } => {
            steps
                .ui()
                .success("Login shell changed to zsh; log out and back in to use it");
            steps.record(LOGIN_SHELL_STEP, ItemOutcome::Installed, Some(strategy));
        }
        ShellChange::WouldChange => {
            steps
                .ui()
                .message(&format!("Would change the login shell to {}", zsh.display()));
            steps.record(LOGIN_SHELL_STEP, ItemOutcome::Planned, None);
        }
        ShellChange::Failed { manual } => {
            steps
                .ui()
                .warning("Could not change the login shell. Run these commands manually:");
            for command in &manual {
                steps.ui().detail(command);
            }
            steps.record(
                LOGIN_SHELL_STEP,
                ItemOutcome::Failed,
                Some("manual change required".to_string()),
            );
        }
    }
}

/// Re-check the end state and report each point. Problems are warnings only.
fn verify_setup(steps: &mut StepRunner<'_>, ictx: &InstallerContext<'_>, options: &SetupOptions) -> usize {
    let mut checks: Vec<(String, bool)> = vec![
        ("zsh on PATH".to_string(), ictx.run.find_executable("zsh").is_some()),
        (
            format!("oh-my-zsh at {}", ictx.run.zsh_dir.display()),
            OhMyZsh::new(&options.framework_url).is_present(ictx),
        ),
    ];
    for plugin in options.plugins.iter().filter(|p| p.is_external()) {
        checks.push((format!("plugin {}", plugin.name), plugin.is_present(ictx)));
    }
    let plugins = declared_plugins(options, ictx);
    let applied = ZshrcEditor::new(&ictx.run.zshrc, &plugins, options.settings.clone())
        .is_applied()
        .unwrap_or(false);
    checks.push((format!("{} configured", ictx.run.zshrc.display()), applied));

    let mut problems = 0;
    for (label, ok) in checks {
        if ok {
            steps.ui().success(&label);
        } else {
            problems += 1;
            steps.ui().warning(&format!("{}: missing", label));
        }
    }
    if problems > 0 {
        tracing::debug!("verification found {} problems", problems);
    }
    problems
}

/// Map a fatal error to the message shown before exit.
pub fn describe_fatal(err: &RigupError) -> String {
    match err {
        RigupError::FatalStep { step, .. } if step == ZSHRC_STEP => {
            format!("{}. Did the oh-my-zsh install complete?", err)
        }
        _ => err.to_string(),
    }
}
