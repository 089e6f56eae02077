//! Host profile classification.

use std::fmt;
use std::path::Path;

use super::os_release::OsRelease;

/// Distribution IDs that belong to the Arch family.
const ARCH_IDS: &[&str] = &["arch", "manjaro", "endeavouros", "garuda", "artix"];

/// Distribution IDs that belong to the Debian family.
const DEBIAN_IDS: &[&str] = &[
    "debian",
    "ubuntu",
    "linuxmint",
    "pop",
    "elementary",
    "zorin",
    "kali",
    "raspbian",
];

/// Which package-manager verbs apply to this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Arch Linux and derivatives (pacman).
    ArchFamily,
    /// Debian, Ubuntu and derivatives (apt).
    DebianFamily,
    /// Anything else. Not supported.
    Unknown,
}

impl Profile {
    /// Classify a host from its identification data.
    ///
    /// An explicit `ID` match wins over an `ID_LIKE` family match.
    pub fn classify(os: &OsRelease) -> Self {
        if let Some(id) = os.id() {
            if let Some(profile) = Self::from_id(&id) {
                return profile;
            }
        }

        for like in os.id_like() {
            match like.as_str() {
                "arch" => return Profile::ArchFamily,
                "debian" | "ubuntu" => return Profile::DebianFamily,
                _ => {}
            }
        }

        Profile::Unknown
    }

    fn from_id(id: &str) -> Option<Self> {
        if ARCH_IDS.contains(&id) {
            Some(Profile::ArchFamily)
        } else if DEBIAN_IDS.contains(&id) {
            Some(Profile::DebianFamily)
        } else {
            None
        }
    }

    /// Whether rigup can provision this host.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Profile::Unknown)
    }

    /// Short identifier used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::ArchFamily => "arch-family",
            Profile::DebianFamily => "debian-family",
            Profile::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything the prober learned about the host.
#[derive(Debug, Clone)]
pub struct HostInfo {
    /// Classified profile.
    pub profile: Profile,
    /// Raw identification data, if the file could be read.
    pub os_release: Option<OsRelease>,
}

impl HostInfo {
    /// Probe the host using the identification file at `path`.
    ///
    /// A missing file yields [`Profile::Unknown`], never an error.
    pub fn detect(path: &Path) -> Self {
        let os_release = OsRelease::load(path);
        let profile = os_release
            .as_ref()
            .map(Profile::classify)
            .unwrap_or(Profile::Unknown);
        tracing::debug!("Probed {} as {}", path.display(), profile);
        Self {
            profile,
            os_release,
        }
    }

    /// Distribution name for display, e.g. "Ubuntu 24.04.1 LTS".
    pub fn display_name(&self) -> String {
        let Some(os) = &self.os_release else {
            return "unidentified host".to_string();
        };
        match (os.pretty_name(), os.id()) {
            (Some(name), _) => name.to_string(),
            (None, Some(id)) => match os.version_id() {
                Some(v) => format!("{} {}", id, v),
                None => id,
            },
            (None, None) => "unidentified host".to_string(),
        }
    }

    /// Describe why the host is unsupported, for the abort message.
    pub fn unsupported_detail(&self) -> String {
        match &self.os_release {
            None => "no readable os-release file".to_string(),
            Some(os) => format!(
                "ID={} ID_LIKE={}",
                os.id().unwrap_or_else(|| "<none>".to_string()),
                match os.id_like() {
                    like if like.is_empty() => "<none>".to_string(),
                    like => like.join(" "),
                }
            ),
        }
    }
}
