//! Environment prober.
//!
//! Reads the host identification file and classifies the machine into a
//! [`Profile`], which decides the package-manager verbs and per-tool install
//! procedures used for the rest of the run.
//!
//! # Example
//!
//! ```
//! use rigup::host::{OsRelease, Profile};
//!
//! let os = OsRelease::parse("ID=ubuntu\nID_LIKE=debian\n");
//! assert_eq!(Profile::classify(&os), Profile::DebianFamily);
//! ```

pub mod os_release;
pub mod profile;

pub use os_release::{OsRelease, DEFAULT_OS_RELEASE};
pub use profile::{HostInfo, Profile};
