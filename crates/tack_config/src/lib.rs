//! Parsing and validation of `tack.toml` configuration files.
//!
//! The configuration names the content to scan, generator options, and the
//! tables the built-in resolver turns into CSS rules.

#![warn(missing_docs)]

pub mod content;
pub mod error;
pub mod loader;
pub mod types;

pub use content::resolve_content_files;
pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
