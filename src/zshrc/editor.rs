//! Backup-then-replace editing of the startup file.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::error::{RigupError, Result};

use super::patch::{canonical_plugin_line, patch};

/// Infix between the file name and the timestamp of a backup.
pub const BACKUP_INFIX: &str = "rigup-backup";

/// What [`ZshrcEditor::apply`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The file already had the declaration and settings block.
    AlreadyApplied,
    /// The file was rewritten; the previous content is at `backup`.
    Applied { backup: PathBuf },
    /// Dry run: the file would be rewritten.
    WouldApply,
}

/// Applies the plugin declaration and settings block to one file.
#[derive(Debug, Clone)]
pub struct ZshrcEditor {
    path: PathBuf,
    plugin_line: String,
    settings: Vec<String>,
}

impl ZshrcEditor {
    pub fn new(path: &Path, plugins: &[&str], settings: Vec<String>) -> Self {
        Self {
            path: path.to_path_buf(),
            plugin_line: canonical_plugin_line(plugins),
            settings,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn plugin_line(&self) -> &str {
        &self.plugin_line
    }

    /// Content the file should have.
    pub fn desired(&self, content: &str) -> String {
        patch(content, &self.plugin_line, &self.settings)
    }

    /// Whether the file is present and already patched.
    pub fn is_applied(&self) -> Result<bool> {
        let content = fs::read_to_string(self.target()?)?;
        Ok(self.desired(&content) == content)
    }

    /// Patch the file in place.
    ///
    /// The file must exist. An exclusive advisory lock is held for the whole
    /// edit. The original is copied to a timestamped backup before the new
    /// content is renamed over it, so a failure at any point leaves either
    /// the untouched original or the finished edit.
    pub fn apply(&self, dry_run: bool) -> Result<EditOutcome> {
        let target = self.target()?;

        let mut file = OpenOptions::new().read(true).write(true).open(&target)?;
        file.try_lock_exclusive().map_err(|e| {
            if e.kind() == fs2::lock_contended_error().kind() || e.kind() == ErrorKind::WouldBlock {
                RigupError::RcFileLocked {
                    path: target.clone(),
                }
            } else {
                RigupError::Io(e)
            }
        })?;

        let result = self.apply_locked(&mut file, &target, dry_run);
        let _ = FileExt::unlock(&file);
        result
    }

    fn apply_locked(&self, file: &mut fs::File, target: &Path, dry_run: bool) -> Result<EditOutcome> {
        let mut content = String::new();
        file.read_to_string(&mut content)?;

        let desired = self.desired(&content);
        if desired == content {
            tracing::debug!("{} already patched", target.display());
            return Ok(EditOutcome::AlreadyApplied);
        }
        if dry_run {
            return Ok(EditOutcome::WouldApply);
        }

        let backup = backup_path(target, Local::now());
        fs::copy(target, &backup)?;
        tracing::debug!("backed up {} to {}", target.display(), backup.display());

        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(desired.as_bytes())?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        fs::set_permissions(tmp.path(), file.metadata()?.permissions())?;
        tmp.persist(target).map_err(|e| RigupError::Io(e.error))?;

        Ok(EditOutcome::Applied { backup })
    }

    /// The real file behind the configured path. A symlinked rc file is
    /// edited at its destination so the link survives the rename.
    fn target(&self) -> Result<PathBuf> {
        if !self.path.exists() {
            return Err(RigupError::RcFileMissing {
                path: self.path.clone(),
            });
        }
        Ok(fs::canonicalize(&self.path)?)
    }
}

/// `<file>.rigup-backup.<YYYYmmddHHMMSS>`, with `.1`, `.2`, ... appended
/// when a backup from the same second already exists.
pub fn backup_path(path: &Path, now: DateTime<Local>) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".zshrc".to_string());
    let base = format!("{}.{}.{}", file_name, BACKUP_INFIX, now.format("%Y%m%d%H%M%S"));

    let candidate = path.with_file_name(&base);
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| path.with_file_name(format!("{}.{}", base, n)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// Backups of `path` in the same directory, oldest first.
pub fn list_backups(path: &Path) -> Result<Vec<PathBuf>> {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return Ok(Vec::new());
    };
    let prefix = format!("{}.{}.", name, BACKUP_INFIX);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    let mut backups: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy().starts_with(&prefix))
                .unwrap_or(false)
        })
        .collect();
    backups.sort();
    Ok(backups)
}
