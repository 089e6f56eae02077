//! Idempotent patching of the zsh startup file.
//!
//! Two things are managed: the single active `plugins=(...)` declaration and
//! a marker-delimited settings block. Everything else in the file is left
//! exactly as the user wrote it.

pub mod editor;
pub mod patch;

pub use editor::{backup_path, list_backups, EditOutcome, ZshrcEditor};
pub use patch::{
    canonical_plugin_line, count_declarations, default_settings, BLOCK_BEGIN, BLOCK_END,
};
