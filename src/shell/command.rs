//! External command execution.
//!
//! Every package-manager call, remote installer and git clone goes through
//! the [`CommandRunner`] trait so the step runner can be driven by a scripted
//! fake in tests. [`SystemRunner`] is the production implementation; it
//! enforces the per-command time ceiling by polling the child and killing it
//! once the deadline passes.

use crate::error::{RigupError, Result};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a child with a deadline is polled.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A single external command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to execute (resolved on PATH).
    pub program: String,

    /// Arguments passed verbatim, no shell interpretation.
    pub args: Vec<String>,

    /// Extra environment variables (merged with the inherited env).
    pub env: Vec<(String, String)>,

    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Kill the command after this long (None = no ceiling).
    pub timeout: Option<Duration>,

    /// Inherit stdin/stdout/stderr instead of capturing (for password prompts).
    pub interactive: bool,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            ..Default::default()
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
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

    /// Set the working directory.
    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Bound the command's runtime.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Let the command talk to the terminal directly.
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Wrap this command in `sudo` unless already running elevated.
    ///
    /// Non-interactive commands get `sudo -n` so a missing credential fails
    /// fast instead of blocking on a hidden password prompt.
    pub fn privileged(self, elevated: bool) -> Self {
        if elevated {
            return self;
        }
        let mut args = Vec::with_capacity(self.args.len() + 2);
        if !self.interactive {
            args.push("-n".to_string());
        }
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
            ..self
        }
    }

    /// Run as `user` through `sudo -u <user> -H`. sudo resets the
    /// environment, so extra variables travel on an `env` prefix.
    pub fn as_user(self, user: &str) -> Self {
        let mut args = vec![
            "-n".to_string(),
            "-u".to_string(),
            user.to_string(),
            "-H".to_string(),
            "env".to_string(),
        ];
        args.extend(self.env.iter().map(|(k, v)| format!("{}={}", k, v)));
        args.push(self.program);
        args.extend(self.args);
        Self {
            program: "sudo".to_string(),
            args,
            env: Vec::new(),
            ..self
        }
    }

    /// Render the command line for logs and error messages.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }
}

/// Executes external commands.
pub trait CommandRunner {
    /// Run a command to completion.
    ///
    /// Returns `Ok` with a failure result on non-zero exit; returns `Err`
    /// only when the command could not be started or hit its timeout.
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Runs commands on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        tracing::debug!("exec: {}", spec.display());
        let start = Instant::now();

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        for (key, value) in &spec.env {
            cmd.env(key, value);
        }
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        // A bounded command leads its own process group so the deadline
        // kill reaches whatever it started.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            if spec.timeout.is_some() && !spec.interactive {
                cmd.process_group(0);
            }
        }

        if spec.interactive {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        } else {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }

        let mut child = cmd.spawn().map_err(|e| {
            tracing::debug!("spawn failed for {}: {}", spec.program, e);
            RigupError::CommandFailed {
                command: spec.display(),
                code: None,
            }
        })?;

        // Drain pipes on their own threads so a chatty child can't fill the
        // pipe buffer and stall while we wait on it.
        let stdout_handle = child.stdout.take().map(|mut out| {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = out.read_to_string(&mut buf);
                buf
            })
        });
        let stderr_handle = child.stderr.take().map(|mut err| {
            thread::spawn(move || {
                let mut buf = String::new();
                let _ = err.read_to_string(&mut buf);
                buf
            })
        });

        let status = match spec.timeout {
            Some(limit) => wait_with_deadline(&mut child, limit, spec)?,
            None => child.wait()?,
        };

        let stdout = stdout_handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default();
        let stderr = stderr_handle
            .and_then(|h| h.join().ok())
            .unwrap_or_default();
        let duration = start.elapsed();

        if status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(status.code(), stdout, stderr, duration))
        }
    }
}

fn wait_with_deadline(
    child: &mut Child,
    limit: Duration,
    spec: &CommandSpec,
) -> Result<std::process::ExitStatus> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline {
            tracing::debug!("killing '{}' after {:?}", spec.display(), limit);
            kill_tree(child, spec);
            let _ = child.wait();
            return Err(RigupError::CommandTimedOut {
                command: spec.display(),
                secs: limit.as_secs(),
            });
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Kill the child together with its process group when it leads one.
fn kill_tree(child: &mut Child, spec: &CommandSpec) {
    #[cfg(unix)]
    {
        if !spec.interactive {
            if let Ok(pgid) = libc::pid_t::try_from(child.id()) {
                // SAFETY: kill takes plain integers and touches no memory.
                unsafe {
                    libc::kill(-pgid, libc::SIGKILL);
                }
            }
        }
    }
    #[cfg(not(unix))]
    let _ = spec;
    let _ = child.kill();
}

/// Run a command and turn a non-zero exit into [`RigupError::CommandFailed`].
pub fn run_checked(runner: &dyn CommandRunner, spec: &CommandSpec) -> Result<CommandResult> {
    let result = runner.run(spec)?;
    if result.success {
        Ok(result)
    } else {
        let stderr = result.stderr.trim();
        if !stderr.is_empty() {
            tracing::debug!("{} stderr: {}", spec.program, stderr);
        }
        Err(RigupError::CommandFailed {
            command: spec.display(),
            code: result.exit_code,
        })
    }
}

/// Run a command and report only whether it exited 0.
pub fn succeeds(runner: &dyn CommandRunner, spec: &CommandSpec) -> bool {
    runner.run(spec).map(|r| r.success).unwrap_or(false)
}
