//! `os-release` file parsing.
//!
//! The file is a list of `KEY=value` lines; values may be wrapped in double
//! or single quotes. Comments and malformed lines are skipped.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Default location of the host identification file.
pub const DEFAULT_OS_RELEASE: &str = "/etc/os-release";

/// Parsed host identification data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    fields: BTreeMap<String, String>,
}

impl OsRelease {
    /// Parse `os-release` content.
    pub fn parse(content: &str) -> Self {
        let fields = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), unquote(value.trim())))
            .collect();
        Self { fields }
    }

    /// Load and parse the file at `path`.
    ///
    /// Returns `None` if the file is missing or unreadable.
    pub fn load(path: &Path) -> Option<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Some(Self::parse(&content)),
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Look up a raw field.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// The `ID` field, lowercased.
    pub fn id(&self) -> Option<String> {
        self.get("ID").map(str::to_lowercase)
    }

    /// The space-separated `ID_LIKE` tokens, lowercased.
    pub fn id_like(&self) -> Vec<String> {
        self.get("ID_LIKE")
            .map(|v| v.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default()
    }

    /// The `VERSION_ID` field.
    pub fn version_id(&self) -> Option<&str> {
        self.get("VERSION_ID")
    }

    /// Human-readable distribution name.
    pub fn pretty_name(&self) -> Option<&str> {
        self.get("PRETTY_NAME").or_else(|| self.get("NAME"))
    }
}

fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return value[1..value.len() - 1].to_string();
        }
    }
    value.to_string()
}
