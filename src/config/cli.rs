//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.
//! Every option can also be set through the environment variable named in
//! its help text.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};

/// roomwatch: Server Room Environment Monitor
///
/// Samples temperature and humidity, and posts threshold alerts and
/// periodic status updates to a Slack-compatible incoming webhook.
#[derive(Debug, Parser)]
#[command(name = "roomwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Incoming-webhook URL
    #[arg(long = "webhook-url", env = "SLACK_WEBHOOK_URL", hide_env_values = true, global = true)]
    pub webhook_url: Option<String>,

    /// Enable or disable webhook delivery
    #[arg(
        long = "webhook-enabled",
        env = "WEBHOOK_ENABLED",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    pub webhook_enabled: Option<bool>,

    /// Attempts per delivery (1-10)
    #[arg(long = "retry-count", env = "WEBHOOK_RETRY_COUNT", global = true)]
    pub retry_count: Option<u32>,

    /// Base backoff between attempts in seconds (1-60)
    #[arg(long = "retry-delay", env = "WEBHOOK_RETRY_DELAY", global = true)]
    pub retry_delay: Option<u64>,

    /// Per-attempt HTTP timeout in seconds (5-120)
    #[arg(long, env = "WEBHOOK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Alert when temperature drops below this (°C)
    #[arg(long = "temp-low", env = "TEMP_ALERT_LOW_THRESHOLD", allow_negative_numbers = true)]
    pub temp_low: Option<f64>,

    /// Alert when temperature rises above this (°C)
    #[arg(long = "temp-high", env = "TEMP_ALERT_HIGH_THRESHOLD", allow_negative_numbers = true)]
    pub temp_high: Option<f64>,

    /// Alert when humidity drops below this (%)
    #[arg(long = "humidity-low", env = "HUMIDITY_ALERT_LOW_THRESHOLD")]
    pub humidity_low: Option<f64>,

    /// Alert when humidity rises above this (%)
    #[arg(long = "humidity-high", env = "HUMIDITY_ALERT_HIGH_THRESHOLD")]
    pub humidity_high: Option<f64>,

    /// Minimum seconds between alerts of the same kind
    #[arg(long, env = "ALERT_COOLDOWN")]
    pub cooldown: Option<u64>,

    /// Seconds between sensor readings
    #[arg(long = "sampling-interval", env = "SAMPLING_INTERVAL")]
    pub sampling_interval: Option<u64>,

    /// Enable periodic status updates
    #[arg(
        long = "status-updates",
        env = "STATUS_UPDATE_ENABLED",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    pub status_updates: Option<bool>,

    /// Seconds between status updates
    #[arg(long = "status-interval", env = "STATUS_UPDATE_INTERVAL")]
    pub status_interval: Option<u64>,

    /// Send a status update right after startup
    #[arg(
        long = "status-on-startup",
        env = "STATUS_UPDATE_ON_STARTUP",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    pub status_on_startup: Option<bool>,

    /// Use simulated readings instead of hardware
    #[arg(
        long = "mock-sensors",
        env = "USE_MOCK_SENSORS",
        value_parser = BoolishValueParser::new(),
        num_args = 0..=1,
        default_missing_value = "true",
    )]
    pub mock_sensors: Option<bool>,

    /// IIO device directory (default: first matching device)
    #[arg(long = "iio-device", value_name = "DIR")]
    pub iio_device: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for roomwatch
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "roomwatch.toml")]
        output: PathBuf,
    },

    /// Send a test message through the configured webhook and exit
    Test,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }

    /// Returns true if this is the test command.
    #[must_use]
    pub const fn is_test(&self) -> bool {
        matches!(self.command, Some(Command::Test))
    }
}
