//! System package manager abstraction.
//!
//! Each supported [`Profile`] maps to one [`PackageManager`] implementation
//! exposing the three verbs the reconciler and step runner need. Adding a
//! distribution family means adding a profile and an implementation here;
//! callers only see the trait.

pub mod apt;
pub mod pacman;

pub use apt::Apt;
pub use pacman::Pacman;

use std::time::Duration;

use crate::error::Result;
use crate::host::Profile;
use crate::shell::CommandRunner;

/// Verbs rigup needs from a system package manager.
pub trait PackageManager {
    /// Short name for logs ("apt", "pacman").
    fn name(&self) -> &'static str;

    /// Whether the package database reports `package` as installed.
    fn query_installed(&self, package: &str) -> bool;

    /// Refresh the package index.
    fn update_index(&self) -> Result<()>;

    /// Install all `packages` in one transaction.
    fn install_many(&self, packages: &[&str]) -> Result<()>;
}

/// Construct the package manager for a profile.
///
/// Returns `None` for [`Profile::Unknown`].
pub fn for_profile<'a>(
    profile: Profile,
    runner: &'a dyn CommandRunner,
    elevated: bool,
    timeout: Duration,
) -> Option<Box<dyn PackageManager + 'a>> {
    match profile {
        Profile::DebianFamily => Some(Box::new(Apt::new(runner, elevated, timeout))),
        Profile::ArchFamily => Some(Box::new(Pacman::new(runner, elevated, timeout))),
        Profile::Unknown => None,
    }
}
