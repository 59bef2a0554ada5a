//! Configuration for the block atlas tool.
//!
//! Settings persist to disk as `config.ron`; every field has a default so
//! partial files load. Command-line flags override the loaded values.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{AtlasConfig, CONFIG_FILE, Config, DebugConfig, default_config_dir};
pub use error::ConfigError;
