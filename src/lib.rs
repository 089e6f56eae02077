//! Rigup - zsh and developer tool provisioning for Linux workstations.
//!
//! Rigup installs zsh, oh-my-zsh and a set of plugins, patches `~/.zshrc`
//! idempotently, switches the login shell, and installs developer tools
//! picked from a numbered menu. Arch-family and Debian-family hosts are
//! supported; everything else is refused before any change is made.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional YAML configuration
//! - [`error`] - Error types and result aliases
//! - [`host`] - Host identification and profile classification
//! - [`install`] - The installable contract and the zsh components
//! - [`login_shell`] - Login shell switching
//! - [`packages`] - Package managers per profile
//! - [`provision`] - Run context, step execution and reporting
//! - [`reconcile`] - Presence checks
//! - [`shell`] - External command execution
//! - [`tools`] - The developer tool catalog and menu
//! - [`ui`] - Prompts, spinners and terminal output
//! - [`zshrc`] - Startup file patching
//!
//! # Example
//!
//! ```
//! use rigup::tools::{parse_selection, Selection, Tool};
//!
//! let selection = parse_selection("9 2 9").unwrap();
//! assert_eq!(selection, Selection::Tools(vec![Tool::Nginx, Tool::Tmux]));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod install;
pub mod login_shell;
pub mod packages;
pub mod provision;
pub mod reconcile;
pub mod shell;
pub mod tools;
pub mod ui;
pub mod zshrc;

pub use error::{RigupError, Result};
