//! Analysis configuration for the CLI.
//!
//! Values are merged with the precedence command-line flag, then `--set`, then
//! the TOML file, then the built-in defaults, and validated by the core builder.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::ConfigOverrides;
