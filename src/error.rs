//! Error types for rigup operations.
//!
//! This module defines [`RigupError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Fatal preconditions and fatal steps surface as `RigupError` values and
//!   end the run with exit code 1
//! - Recoverable step failures are recorded in the run report instead of
//!   being propagated
//! - Use `anyhow::Error` (via `RigupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rigup operations.
#[derive(Debug, Error)]
pub enum RigupError {
    /// The host could not be classified into a supported profile.
    #[error("Unsupported host: {detail}")]
    UnsupportedHost { detail: String },

    /// The shell startup file does not exist.
    #[error("Shell startup file not found: {path}")]
    RcFileMissing { path: PathBuf },

    /// Another process holds the lock on the shell startup file.
    #[error("Shell startup file is locked by another process: {path}")]
    RcFileLocked { path: PathBuf },

    /// Configuration file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A step whose failure aborts the whole run.
    #[error("Fatal step '{step}' failed: {message}")]
    FatalStep { step: String, message: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// External command exceeded its time ceiling and was killed.
    #[error("Command timed out after {secs}s: {command}")]
    CommandTimedOut { command: String, secs: u64 },

    /// Remote installer download failed.
    #[error("Download failed for {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// Menu input did not pass validation.
    #[error("Invalid selection '{input}': {message}")]
    InvalidSelection { input: String, message: String },

    /// A prompt could not be answered (non-interactive with no default).
    #[error("Cannot prompt for '{key}' in non-interactive mode")]
    PromptUnavailable { key: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rigup operations.
pub type Result<T> = std::result::Result<T, RigupError>;
