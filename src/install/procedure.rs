//! Install procedures.
//!
//! A [`Procedure`] is the concrete action that makes an item present:
//! a package transaction, a downloaded installer script, or a shallow git
//! clone. Network-bound procedures always run under the context's network
//! timeout.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;
use crate::shell::{run_checked, CommandSpec};

use super::InstallerContext;

/// A remote installer script invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteScript {
    /// HTTPS location of the script.
    pub url: String,
    /// Interpreter that runs the downloaded file (`sh`, `bash`).
    pub interpreter: &'static str,
    /// Arguments after the script path; must include the unattended flag.
    pub args: Vec<String>,
    /// Environment for the script.
    pub env: Vec<(String, String)>,
}

impl RemoteScript {
    /// A script run by `sh` with no arguments.
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            interpreter: "sh",
            args: Vec::new(),
            env: Vec::new(),
        }
    }

    /// Run with a different interpreter.
    pub fn interpreter(mut self, interpreter: &'static str) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Append script arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Add an environment variable.
    pub fn env(mut self, key: &str, value: impl Into<String>) -> Self {
        self.env.push((key.to_string(), value.into()));
        self
    }
}

/// How an item gets installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Procedure {
    /// Install these packages through the profile's package manager.
    Packages(Vec<&'static str>),
    /// Download and execute an installer script.
    RemoteScript(RemoteScript),
    /// Shallow-clone a repository into `dest`.
    GitClone { repo: String, dest: PathBuf },
}

impl Procedure {
    /// Execute the procedure.
    pub fn run(&self, ictx: &InstallerContext<'_>) -> Result<()> {
        match self {
            Procedure::Packages(packages) => ictx.packages.install_many(packages),
            Procedure::RemoteScript(script) => run_remote_script(script, ictx),
            Procedure::GitClone { repo, dest } => git_clone(repo, dest, ictx),
        }
    }

    /// One-line description for dry runs.
    pub fn describe(&self, ictx: &InstallerContext<'_>) -> String {
        match self {
            Procedure::Packages(packages) => {
                format!("{} install {}", ictx.packages.name(), packages.join(" "))
            }
            Procedure::RemoteScript(script) => {
                format!("{} <({}) {}", script.interpreter, script.url, script.args.join(" "))
                    .trim_end()
                    .to_string()
            }
            Procedure::GitClone { repo, dest } => {
                format!("git clone --depth=1 {} {}", repo, dest.display())
            }
        }
    }
}

fn run_remote_script(script: &RemoteScript, ictx: &InstallerContext<'_>) -> Result<()> {
    let body = ictx.fetcher.fetch_script(&script.url)?;

    let mut file = tempfile::Builder::new()
        .prefix("rigup-installer-")
        .suffix(".sh")
        .tempfile()?;
    file.write_all(body.as_bytes())?;
    file.flush()?;

    let mut spec = CommandSpec::new(script.interpreter)
        .arg(file.path().to_string_lossy().into_owned())
        .args(script.args.iter().cloned())
        .env("HOME", ictx.run.home.to_string_lossy().into_owned())
        .timeout(ictx.run.network_timeout);
    for (key, value) in &script.env {
        spec = spec.env(key, value.clone());
    }

    // Installers write into the user's home, so a root run hands the
    // script to that user instead of creating root-owned files there.
    if ictx.run.acts_for_other_user() {
        make_world_readable(file.path())?;
        spec = spec.as_user(&ictx.run.user);
    }

    run_checked(ictx.runner, &spec)?;
    Ok(())
}

#[cfg(unix)]
fn make_world_readable(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_world_readable(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

fn git_clone(repo: &str, dest: &std::path::Path, ictx: &InstallerContext<'_>) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let spec = CommandSpec::new("git")
        .args(["clone", "--depth=1", repo])
        .arg(dest.to_string_lossy().into_owned())
        .env("GIT_TERMINAL_PROMPT", "0")
        .timeout(ictx.run.network_timeout);

    if let Err(e) = run_checked(ictx.runner, &spec) {
        // A killed or failed clone can leave a half-populated directory that
        // would later pass the presence check.
        if dest.exists() {
            let _ = fs::remove_dir_all(dest);
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RigupError;
    use crate::install::test_support::Harness;
    use crate::provision::RunContext;
    use crate::shell::MockOutcome;

    #[test]
    fn packages_go_through_package_manager() {
        let h = Harness::debian();
        Procedure::Packages(vec!["docker.io"]).run(&h.ctx()).unwrap();
        assert!(h.runner.was_called("apt-get install -y docker.io"));
    }

    #[test]
    fn remote_script_runs_downloaded_file_with_timeout() {
        let h = Harness::debian().with_script("https://get.example.test", "echo hi");
        let script = RemoteScript::new("https://get.example.test")
            .args(["-y"])
            .env("RUNZSH", "no");

        Procedure::RemoteScript(script).run(&h.ctx()).unwrap();

        let calls = h.runner.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("sh "));
        assert!(calls[0].contains("rigup-installer-"));
        assert!(calls[0].ends_with(" -y"));
    }

    #[test]
    fn elevated_remote_script_runs_as_target_user() {
        let h = Harness::debian()
            .with_script("https://get.example.test", "echo hi")
            .with_run(|r| r.with_elevated(true));
        let script = RemoteScript::new("https://get.example.test")
            .interpreter("bash")
            .env("PROFILE", "/dev/null");

        Procedure::RemoteScript(script).run(&h.ctx()).unwrap();

        let calls = h.runner.calls();
        assert_eq!(calls.len(), 1);
        let home = format!("HOME={}", h.home().display());
        assert!(calls[0].starts_with(&format!("sudo -n -u dev -H env {} PROFILE=/dev/null bash ", home)));
        assert!(calls[0].contains("rigup-installer-"));
    }

    #[test]
    fn root_user_runs_remote_script_directly() {
        let h = Harness::debian()
            .with_script("https://get.example.test", "echo hi")
            .with_run(|r| RunContext::new(r.profile, "root", &r.home).with_elevated(true));

        Procedure::RemoteScript(RemoteScript::new("https://get.example.test"))
            .run(&h.ctx())
            .unwrap();

        assert!(h.runner.calls()[0].starts_with("sh "));
    }

    #[test]
    fn remote_script_download_failure_runs_nothing() {
        let h = Harness::debian();
        let err = Procedure::RemoteScript(RemoteScript::new("https://missing.test"))
            .run(&h.ctx())
            .unwrap_err();

        assert!(matches!(err, RigupError::DownloadFailed { .. }));
        assert!(h.runner.calls().is_empty());
    }

    #[test]
    fn remote_script_timeout_propagates() {
        let h = Harness::debian()
            .with_script("https://slow.test", "sleep 999")
            .with_runner(|r| r.on("sh ", MockOutcome::Timeout));
        let err = Procedure::RemoteScript(RemoteScript::new("https://slow.test"))
            .run(&h.ctx())
            .unwrap_err();
        assert!(matches!(err, RigupError::CommandTimedOut { .. }));
    }

    #[test]
    fn git_clone_creates_parent_dir() {
        let h = Harness::debian();
        let dest = h.home().join(".oh-my-zsh/custom/plugins/zsh-autosuggestions");
        Procedure::GitClone {
            repo: "https://github.com/zsh-users/zsh-autosuggestions".into(),
            dest: dest.clone(),
        }
        .run(&h.ctx())
        .unwrap();

        assert!(dest.parent().unwrap().is_dir());
        assert!(h.runner.was_called("git clone --depth=1 https://github.com/zsh-users/zsh-autosuggestions"));
    }

    #[test]
    fn failed_clone_removes_partial_checkout() {
        let h = Harness::debian().with_runner(|r| r.on("git clone", MockOutcome::Timeout));
        let dest = h.home().join("plugins/partial");
        fs::create_dir_all(dest.join(".git")).unwrap();

        let result = Procedure::GitClone {
            repo: "https://example.test/partial".into(),
            dest: dest.clone(),
        }
        .run(&h.ctx());

        assert!(result.is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn describe_package_procedure() {
        let h = Harness::arch();
        let text = Procedure::Packages(vec!["docker", "nginx"]).describe(&h.ctx());
        assert_eq!(text, "pacman install docker nginx");
    }
}
