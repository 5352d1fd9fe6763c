//! Configuration layer for roomwatch.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **CLI arguments or environment variables** - clap reads both; an
//!    explicit flag beats its environment variable
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Boolean switches (`--webhook-enabled`, `--status-updates`, ...) take an
//! optional value, so `--status-updates false` can turn off what the file
//! turned on.
//!
//! # Webhook URL
//!
//! The URL is optional. Without it the monitor still samples and logs, and
//! every delivery is skipped. The URL is never logged unmasked.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use toml::{TomlConfig, default_config_template};
pub use validated::{SensorChoice, ValidatedConfig, write_default_config};
