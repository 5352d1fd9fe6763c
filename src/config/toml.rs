//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook delivery section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Alert threshold section
    #[serde(default)]
    pub thresholds: ThresholdsSection,

    /// Alert behaviour section
    #[serde(default)]
    pub alerts: AlertsSection,

    /// Sampling section
    #[serde(default)]
    pub monitor: MonitorSection,

    /// Periodic status update section
    #[serde(default)]
    pub status: StatusSection,

    /// Sensor selection section
    #[serde(default)]
    pub sensor: SensorSection,
}

/// Webhook delivery section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Incoming-webhook URL
    pub url: Option<String>,

    /// Master switch for delivery
    pub enabled: Option<bool>,

    /// Attempts per delivery
    pub retry_count: Option<u32>,

    /// Base backoff in seconds
    pub retry_delay: Option<u64>,

    /// Per-attempt timeout in seconds
    pub timeout: Option<u64>,
}

/// Alert threshold section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdsSection {
    /// Lower temperature bound (°C)
    pub temp_min_c: Option<f64>,

    /// Upper temperature bound (°C)
    pub temp_max_c: Option<f64>,

    /// Lower humidity bound (%)
    pub humidity_min: Option<f64>,

    /// Upper humidity bound (%)
    pub humidity_max: Option<f64>,
}

/// Alert behaviour section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertsSection {
    /// Seconds between alerts of the same kind
    pub cooldown: Option<u64>,
}

/// Sampling section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MonitorSection {
    /// Seconds between sensor readings
    pub sampling_interval: Option<u64>,
}

/// Periodic status update section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusSection {
    /// Send periodic status updates
    pub enabled: Option<bool>,

    /// Seconds between updates
    pub interval: Option<u64>,

    /// Send one update right after startup
    pub on_startup: Option<bool>,
}

/// Sensor selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorSection {
    /// Use simulated readings
    pub mock: Option<bool>,

    /// IIO device directory
    pub iio_device: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# roomwatch configuration file
#
# Every setting can also be given on the command line or through the
# environment variable shown next to it. Command line and environment
# win over this file.

[webhook]
# Slack-compatible incoming-webhook URL (SLACK_WEBHOOK_URL)
# Alerts are not sent until this is set.
# url = "https://hooks.slack.com/services/..."

# Master switch for delivery (WEBHOOK_ENABLED)
# enabled = true

# Attempts per delivery, 1-10 (WEBHOOK_RETRY_COUNT)
retry_count = 3

# Base backoff in seconds, doubled after each failure and capped at 300 (WEBHOOK_RETRY_DELAY)
retry_delay = 5

# Per-attempt timeout in seconds, 5-120 (WEBHOOK_TIMEOUT)
timeout = 10

[thresholds]
# Temperature bounds in Celsius (TEMP_ALERT_LOW_THRESHOLD / TEMP_ALERT_HIGH_THRESHOLD)
temp_min_c = 15.0
temp_max_c = 32.0

# Relative humidity bounds in percent (HUMIDITY_ALERT_LOW_THRESHOLD / HUMIDITY_ALERT_HIGH_THRESHOLD)
humidity_min = 20.0
humidity_max = 70.0

[alerts]
# Minimum seconds between two alerts of the same kind (ALERT_COOLDOWN)
cooldown = 900

[monitor]
# Seconds between sensor readings (SAMPLING_INTERVAL)
sampling_interval = 60

[status]
# Periodic status updates (STATUS_UPDATE_ENABLED)
enabled = false

# Seconds between updates; raised to sampling_interval if shorter (STATUS_UPDATE_INTERVAL)
interval = 3600

# Send one update right after startup (STATUS_UPDATE_ON_STARTUP)
on_startup = false

[sensor]
# Use simulated readings instead of hardware (USE_MOCK_SENSORS)
mock = false

# IIO device directory; the first device with temperature and humidity
# channels under /sys/bus/iio/devices is used when unset
# iio_device = "/sys/bus/iio/devices/iio:device0"
"#
    .to_string()
}
