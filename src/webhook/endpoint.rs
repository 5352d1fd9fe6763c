//! Endpoint configuration for webhook delivery.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use super::{RetryPolicy, mask};

/// Error raised when an endpoint configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The URL could not be parsed or is not an HTTP(S) URL with a host.
    #[error("Invalid webhook URL: {reason}")]
    InvalidUrl {
        /// Reason for invalidity (never contains the URL itself)
        reason: String,
    },

    /// A numeric setting is outside its accepted range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Name of the setting
        field: &'static str,
        /// Rejected value
        value: u64,
        /// Inclusive lower bound
        min: u64,
        /// Inclusive upper bound
        max: u64,
    },
}

/// Where and how alerts are delivered.
///
/// Values are immutable once handed to the service: a change is made by
/// building a complete new value (see [`EndpointUpdate`]) and swapping it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Incoming-webhook URL; `None` means alerting is unconfigured
    pub url: Option<Url>,
    /// Master switch for outbound delivery
    pub enabled: bool,
    /// Attempts per delivery, including the first
    pub retry_count: u32,
    /// Base backoff between attempts (doubled after each failure)
    pub retry_delay: Duration,
    /// Per-attempt HTTP timeout
    pub timeout: Duration,
}

impl EndpointConfig {
    /// Accepted range for `retry_count`.
    pub const RETRY_COUNT_RANGE: RangeInclusive<u32> = 1..=10;

    /// Accepted range for `retry_delay`, in seconds.
    pub const RETRY_DELAY_RANGE: RangeInclusive<u64> = 1..=60;

    /// Accepted range for `timeout`, in seconds.
    pub const TIMEOUT_RANGE: RangeInclusive<u64> = 5..=120;

    /// Default attempts per delivery.
    pub const DEFAULT_RETRY_COUNT: u32 = 3;

    /// Default base backoff.
    pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

    /// Default per-attempt timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Ceiling for a single backoff step.
    pub const MAX_BACKOFF: Duration = RetryPolicy::MAX_DELAY;

    /// Creates an enabled endpoint with default retry settings.
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self {
            url: Some(url),
            enabled: true,
            retry_count: Self::DEFAULT_RETRY_COUNT,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Creates an endpoint with no URL; every delivery is skipped.
    #[must_use]
    pub const fn unconfigured() -> Self {
        Self {
            url: None,
            enabled: false,
            retry_count: Self::DEFAULT_RETRY_COUNT,
            retry_delay: Self::DEFAULT_RETRY_DELAY,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the number of attempts per delivery.
    #[must_use]
    pub const fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Sets the base backoff.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns true if deliveries would reach the network.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.enabled && self.url.is_some()
    }

    /// Returns the URL masked to `scheme://host`, or `"none"`.
    #[must_use]
    pub fn masked_url(&self) -> String {
        self.url.as_ref().map_or_else(|| "none".to_string(), mask)
    }

    /// Checks every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), EndpointError> {
        if let Some(url) = &self.url {
            check_url(url)?;
        }

        check_range(
            "retry_count",
            u64::from(self.retry_count),
            &widen(&Self::RETRY_COUNT_RANGE),
        )?;
        check_range(
            "retry_delay",
            self.retry_delay.as_secs(),
            &Self::RETRY_DELAY_RANGE,
        )?;
        check_range("timeout", self.timeout.as_secs(), &Self::TIMEOUT_RANGE)
    }

    /// Builds the backoff schedule for this endpoint.
    ///
    /// Delay before retry `n` is `min(retry_delay * 2^n, 300s)`.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_count, self.retry_delay)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::unconfigured()
    }
}

impl fmt::Display for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (enabled: {}, retry: {}x/{}s, timeout: {}s)",
            self.masked_url(),
            self.enabled,
            self.retry_count,
            self.retry_delay.as_secs(),
            self.timeout.as_secs(),
        )
    }
}

/// A partial change to an [`EndpointConfig`].
///
/// Absent fields keep their current value. Applying an update always
/// produces a complete, validated configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointUpdate {
    /// New webhook URL
    pub url: Option<String>,
    /// New enabled flag
    pub enabled: Option<bool>,
    /// New attempts per delivery
    pub retry_count: Option<u32>,
    /// New base backoff in seconds
    pub retry_delay: Option<u64>,
    /// New per-attempt timeout in seconds
    pub timeout: Option<u64>,
}

impl EndpointUpdate {
    /// Merges this update over `current` and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] if the merged configuration is invalid;
    /// `current` is never modified.
    pub fn apply(&self, current: &EndpointConfig) -> Result<EndpointConfig, EndpointError> {
        let url = match &self.url {
            Some(raw) => Some(parse_endpoint_url(raw)?),
            None => current.url.clone(),
        };

        let merged = EndpointConfig {
            url,
            enabled: self.enabled.unwrap_or(current.enabled),
            retry_count: self.retry_count.unwrap_or(current.retry_count),
            retry_delay: self
                .retry_delay
                .map_or(current.retry_delay, Duration::from_secs),
            timeout: self.timeout.map_or(current.timeout, Duration::from_secs),
        };

        merged.validate()?;
        Ok(merged)
    }
}

/// Parses and checks a webhook URL.
///
/// # Errors
///
/// Returns [`EndpointError::InvalidUrl`] if the string is not an absolute
/// HTTP(S) URL with a host. The error never echoes the URL.
pub fn parse_endpoint_url(raw: &str) -> Result<Url, EndpointError> {
    let url = Url::parse(raw).map_err(|e| EndpointError::InvalidUrl {
        reason: e.to_string(),
    })?;
    check_url(&url)?;
    Ok(url)
}

fn check_url(url: &Url) -> Result<(), EndpointError> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(EndpointError::InvalidUrl {
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }
    if url.host_str().is_none() {
        return Err(EndpointError::InvalidUrl {
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

fn check_range(
    field: &'static str,
    value: u64,
    range: &RangeInclusive<u64>,
) -> Result<(), EndpointError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(EndpointError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn widen(range: &RangeInclusive<u32>) -> RangeInclusive<u64> {
    u64::from(*range.start())..=u64::from(*range.end())
}
