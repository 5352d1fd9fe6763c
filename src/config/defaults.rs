//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

use crate::alert::{AlertThresholds, CooldownTracker};
use crate::monitor::StatusSchedule;
use crate::webhook::EndpointConfig;

/// Default attempts per delivery.
pub const RETRY_COUNT: u32 = EndpointConfig::DEFAULT_RETRY_COUNT;

/// Default base backoff in seconds.
pub const RETRY_DELAY_SECS: u64 = EndpointConfig::DEFAULT_RETRY_DELAY.as_secs();

/// Default per-attempt HTTP timeout in seconds.
pub const TIMEOUT_SECS: u64 = EndpointConfig::DEFAULT_TIMEOUT.as_secs();

/// Default lower temperature bound (°C).
pub const TEMP_MIN_C: f64 = AlertThresholds::DEFAULT_TEMP_MIN_C;

/// Default upper temperature bound (°C).
pub const TEMP_MAX_C: f64 = AlertThresholds::DEFAULT_TEMP_MAX_C;

/// Default lower humidity bound (%).
pub const HUMIDITY_MIN: f64 = AlertThresholds::DEFAULT_HUMIDITY_MIN;

/// Default upper humidity bound (%).
pub const HUMIDITY_MAX: f64 = AlertThresholds::DEFAULT_HUMIDITY_MAX;

/// Default cooldown between alerts of the same kind, in seconds.
pub const ALERT_COOLDOWN_SECS: u64 = CooldownTracker::DEFAULT_WINDOW.as_secs();

/// Default sampling interval in seconds.
pub const SAMPLING_INTERVAL_SECS: u64 = 60;

/// Default status update interval in seconds.
pub const STATUS_INTERVAL_SECS: u64 = StatusSchedule::DEFAULT_INTERVAL.as_secs();

/// Pause after a failed sensor read before trying again.
pub const SENSOR_RETRY_DELAY: Duration = Duration::from_secs(5);
