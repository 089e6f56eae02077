//! Host facts about the invoking user and terminal.

use std::path::{Path, PathBuf};

/// Check if running in a CI environment.
///
/// Used to auto-detect CI and force non-interactive mode in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Name of the user whose login shell and home directory are being set up.
///
/// Prefers `SUDO_USER` so `sudo rigup setup` configures the invoking user
/// rather than root.
pub fn current_user() -> String {
    ["SUDO_USER", "USER", "LOGNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|v| !v.is_empty() && v != "root")
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "root".to_string())
}

/// Home directory of the user being configured.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"))
}

/// Whether `shell` is listed in an `/etc/shells`-style file.
///
/// A missing file is treated as "listed" since there is nothing to check
/// against; `chsh` will report the real problem if any.
pub fn is_listed_shell(shells_file: &Path, shell: &Path) -> bool {
    match std::fs::read_to_string(shells_file) {
        Ok(contents) => contents
            .lines()
            .map(str::trim)
            .filter(|l| !l.starts_with('#'))
            .any(|l| Path::new(l) == shell),
        Err(_) => true,
    }
}
