//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::alert::{AlertSettings, AlertThresholds};
use crate::webhook::{EndpointConfig, parse_endpoint_url};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::toml::TomlConfig;

/// Which sensor to sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorChoice {
    /// Simulated readings
    Mock,
    /// Linux IIO device; `None` means discover one
    Iio(Option<PathBuf>),
}

impl fmt::Display for SensorChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => f.write_str("mock"),
            Self::Iio(Some(path)) => write!(f, "iio ({})", path.display()),
            Self::Iio(None) => f.write_str("iio (auto)"),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Webhook endpoint (may be unconfigured)
    pub endpoint: EndpointConfig,

    /// Alert thresholds
    pub thresholds: AlertThresholds,

    /// Minimum time between alerts of the same kind
    pub cooldown: Duration,

    /// Time between sensor readings
    pub sampling_interval: Duration,

    /// Periodic status updates enabled
    pub status_updates: bool,

    /// Time between status updates
    pub status_interval: Duration,

    /// Send a status update on the first tick
    pub status_on_startup: bool,

    /// Sensor to sample
    pub sensor: SensorChoice,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.status_updates {
            format!("every {}s", self.status_interval.as_secs())
        } else {
            "off".to_string()
        };

        write!(
            f,
            "Config {{ webhook: {}, thresholds: {}, cooldown: {}s, sampling: {}s, \
             status_updates: {}, sensor: {} }}",
            self.endpoint,
            self.thresholds,
            self.cooldown.as_secs(),
            self.sampling_interval.as_secs(),
            status,
            self.sensor,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment variables) take precedence over
    /// TOML config values, which take precedence over built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The webhook URL is not an HTTP(S) URL with a host
    /// - Retry count, retry delay or timeout is out of range
    /// - A threshold is not finite or a min/max pair is not ordered
    /// - The sampling or status interval is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let endpoint = Self::build_endpoint(cli, toml)?;
        let thresholds = Self::build_thresholds(cli, toml)?;

        // Zero disables the cooldown
        let cooldown = Duration::from_secs(
            cli.cooldown
                .or_else(|| toml.and_then(|t| t.alerts.cooldown))
                .unwrap_or(defaults::ALERT_COOLDOWN_SECS),
        );

        let sampling_interval = resolve_positive(
            "sampling_interval",
            cli.sampling_interval,
            toml.and_then(|t| t.monitor.sampling_interval),
            defaults::SAMPLING_INTERVAL_SECS,
        )?;

        let status_interval = resolve_positive(
            "status_interval",
            cli.status_interval,
            toml.and_then(|t| t.status.interval),
            defaults::STATUS_INTERVAL_SECS,
        )?;

        let status_updates = cli
            .status_updates
            .or_else(|| toml.and_then(|t| t.status.enabled))
            .unwrap_or(false);

        let status_on_startup = cli
            .status_on_startup
            .or_else(|| toml.and_then(|t| t.status.on_startup))
            .unwrap_or(false);

        Ok(Self {
            endpoint,
            thresholds,
            cooldown,
            sampling_interval,
            status_updates,
            status_interval,
            status_on_startup,
            sensor: Self::resolve_sensor(cli, toml),
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns the settings the alert service starts with.
    #[must_use]
    pub fn alert_settings(&self) -> AlertSettings {
        AlertSettings {
            endpoint: self.endpoint.clone(),
            thresholds: self.thresholds,
        }
    }

    fn build_endpoint(cli: &Cli, toml: Option<&TomlConfig>) -> Result<EndpointConfig, ConfigError> {
        let webhook = toml.map(|t| &t.webhook);

        // An empty URL counts as unset
        let url = cli
            .webhook_url
            .as_deref()
            .or_else(|| webhook.and_then(|w| w.url.as_deref()))
            .filter(|raw| !raw.trim().is_empty())
            .map(parse_endpoint_url)
            .transpose()?;

        let endpoint = EndpointConfig {
            url,
            enabled: cli
                .webhook_enabled
                .or_else(|| webhook.and_then(|w| w.enabled))
                .unwrap_or(true),
            retry_count: cli
                .retry_count
                .or_else(|| webhook.and_then(|w| w.retry_count))
                .unwrap_or(defaults::RETRY_COUNT),
            retry_delay: Duration::from_secs(
                cli.retry_delay
                    .or_else(|| webhook.and_then(|w| w.retry_delay))
                    .unwrap_or(defaults::RETRY_DELAY_SECS),
            ),
            timeout: Duration::from_secs(
                cli.timeout
                    .or_else(|| webhook.and_then(|w| w.timeout))
                    .unwrap_or(defaults::TIMEOUT_SECS),
            ),
        };

        endpoint.validate()?;
        Ok(endpoint)
    }

    fn build_thresholds(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<AlertThresholds, ConfigError> {
        let section = toml.map(|t| &t.thresholds);

        let thresholds = AlertThresholds {
            temp_min_c: Some(
                cli.temp_low
                    .or_else(|| section.and_then(|s| s.temp_min_c))
                    .unwrap_or(defaults::TEMP_MIN_C),
            ),
            temp_max_c: Some(
                cli.temp_high
                    .or_else(|| section.and_then(|s| s.temp_max_c))
                    .unwrap_or(defaults::TEMP_MAX_C),
            ),
            humidity_min: Some(
                cli.humidity_low
                    .or_else(|| section.and_then(|s| s.humidity_min))
                    .unwrap_or(defaults::HUMIDITY_MIN),
            ),
            humidity_max: Some(
                cli.humidity_high
                    .or_else(|| section.and_then(|s| s.humidity_max))
                    .unwrap_or(defaults::HUMIDITY_MAX),
            ),
        };

        thresholds.validate()?;
        Ok(thresholds)
    }

    fn resolve_sensor(cli: &Cli, toml: Option<&TomlConfig>) -> SensorChoice {
        let section = toml.map(|t| &t.sensor);

        let mock = cli
            .mock_sensors
            .or_else(|| section.and_then(|s| s.mock))
            .unwrap_or(false);

        if mock {
            return SensorChoice::Mock;
        }

        SensorChoice::Iio(
            cli.iio_device
                .clone()
                .or_else(|| section.and_then(|s| s.iio_device.clone())),
        )
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn resolve_positive(
    field: &'static str,
    cli: Option<u64>,
    toml: Option<u64>,
    default: u64,
) -> Result<Duration, ConfigError> {
    // Priority: CLI explicit > TOML > default
    let seconds = cli.or(toml).unwrap_or(default);

    if seconds == 0 {
        return Err(ConfigError::zero_duration(field));
    }

    Ok(Duration::from_secs(seconds))
}
