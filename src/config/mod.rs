//! Optional YAML configuration.
//!
//! The file is read from `--config` or `~/.config/rigup/config.yml`. Every
//! key is optional and unknown keys are rejected.
//!
//! # Example
//!
//! ```
//! use rigup::config::parse_config;
//! use std::path::Path;
//!
//! let config = parse_config("timeout_secs: 90", Path::new("config.yml")).unwrap();
//! assert_eq!(config.timeout_secs, Some(90));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_config, load_config_file, parse_config};
pub use schema::{PluginConfig, RigupConfig};
