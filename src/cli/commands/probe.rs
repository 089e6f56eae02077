//! Probe command implementation.
//!
//! The `rigup probe` command reports how the host was classified without
//! changing anything.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::host::{HostInfo, Profile};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The probe command implementation.
pub struct ProbeCommand {
    os_release: PathBuf,
}

impl ProbeCommand {
    /// Create a new probe command.
    pub fn new(os_release: &Path) -> Self {
        Self {
            os_release: os_release.to_path_buf(),
        }
    }

    fn package_manager(profile: Profile) -> Option<&'static str> {
        match profile {
            Profile::DebianFamily => Some("apt"),
            Profile::ArchFamily => Some("pacman"),
            Profile::Unknown => None,
        }
    }
}

impl Command for ProbeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let host = HostInfo::detect(&self.os_release);

        ui.show_header("Host");
        ui.message(&format!("Distribution:    {}", host.display_name()));
        ui.message(&format!("Profile:         {}", host.profile));

        match Self::package_manager(host.profile) {
            Some(pm) => {
                ui.message(&format!("Package manager: {}", pm));
                Ok(CommandResult::success())
            }
            None => {
                ui.error(&format!("Unsupported host: {}", host.unsupported_detail()));
                Ok(CommandResult::failure(1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn probe(content: &str) -> (CommandResult, MockUI) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("os-release");
        fs::write(&path, content).unwrap();
        let mut ui = MockUI::new();
        let result = ProbeCommand::new(&path).execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn ubuntu_is_debian_family() {
        let (result, ui) = probe("ID=ubuntu\nVERSION_ID=\"24.04\"\nPRETTY_NAME=\"Ubuntu 24.04 LTS\"\n");
        assert!(result.success);
        assert!(ui.has_message("debian-family"));
        assert!(ui.has_message("Ubuntu 24.04 LTS"));
        assert!(ui.has_message("apt"));
    }

    #[test]
    fn manjaro_is_arch_family() {
        let (result, ui) = probe("ID=manjaro\nID_LIKE=arch\n");
        assert!(result.success);
        assert!(ui.has_message("pacman"));
    }

    #[test]
    fn unknown_host_fails() {
        let (result, ui) = probe("ID=gentoo\n");
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("ID=gentoo"));
    }
}
