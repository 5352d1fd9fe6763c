//! Alert thresholds and breach detection.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::kind::ThresholdKind;

/// Error raised when a threshold set is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    /// A bound is NaN or infinite.
    #[error("{field} must be a finite number, got {value}")]
    NotFinite {
        /// Name of the bound
        field: &'static str,
        /// Rejected value
        value: f64,
    },

    /// A lower bound is not strictly below its upper bound.
    #[error("{min_field} ({min}) must be less than {max_field} ({max})")]
    Inverted {
        /// Name of the lower bound
        min_field: &'static str,
        /// Lower bound value
        min: f64,
        /// Name of the upper bound
        max_field: &'static str,
        /// Upper bound value
        max: f64,
    },
}

/// Temperature and humidity bounds. An absent bound disables its check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertThresholds {
    /// Alert when temperature drops below this (°C)
    pub temp_min_c: Option<f64>,
    /// Alert when temperature rises above this (°C)
    pub temp_max_c: Option<f64>,
    /// Alert when humidity drops below this (%)
    pub humidity_min: Option<f64>,
    /// Alert when humidity rises above this (%)
    pub humidity_max: Option<f64>,
}

/// A reading that crossed a bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breach {
    /// Which check fired
    pub kind: ThresholdKind,
    /// The reading
    pub current: f64,
    /// The bound it crossed
    pub threshold: f64,
}

impl AlertThresholds {
    /// Default lower temperature bound (59 °F).
    pub const DEFAULT_TEMP_MIN_C: f64 = 15.0;
    /// Default upper temperature bound (~90 °F).
    pub const DEFAULT_TEMP_MAX_C: f64 = 32.0;
    /// Default lower humidity bound.
    pub const DEFAULT_HUMIDITY_MIN: f64 = 20.0;
    /// Default upper humidity bound.
    pub const DEFAULT_HUMIDITY_MAX: f64 = 70.0;

    /// Thresholds with every check disabled.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            temp_min_c: None,
            temp_max_c: None,
            humidity_min: None,
            humidity_max: None,
        }
    }

    /// Returns the bound guarding `kind`.
    #[must_use]
    pub const fn bound(&self, kind: ThresholdKind) -> Option<f64> {
        match kind {
            ThresholdKind::TempHigh => self.temp_max_c,
            ThresholdKind::TempLow => self.temp_min_c,
            ThresholdKind::HumidityHigh => self.humidity_max,
            ThresholdKind::HumidityLow => self.humidity_min,
        }
    }

    /// Checks that bounds are finite and each present pair is ordered.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let bounds = [
            ("temp_min_c", self.temp_min_c),
            ("temp_max_c", self.temp_max_c),
            ("humidity_min", self.humidity_min),
            ("humidity_max", self.humidity_max),
        ];
        for (field, value) in bounds {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(ThresholdError::NotFinite { field, value });
            }
        }

        check_order(
            ("temp_min_c", self.temp_min_c),
            ("temp_max_c", self.temp_max_c),
        )?;
        check_order(
            ("humidity_min", self.humidity_min),
            ("humidity_max", self.humidity_max),
        )
    }

    /// Returns every check the readings fail.
    ///
    /// Comparisons are strict: a reading equal to its bound is in range.
    #[must_use]
    pub fn breaches(&self, temperature_c: f64, humidity: f64) -> Vec<Breach> {
        ThresholdKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let threshold = self.bound(kind)?;
                let current = match kind {
                    ThresholdKind::TempHigh | ThresholdKind::TempLow => temperature_c,
                    ThresholdKind::HumidityHigh | ThresholdKind::HumidityLow => humidity,
                };
                let crossed = match kind {
                    ThresholdKind::TempHigh | ThresholdKind::HumidityHigh => current > threshold,
                    ThresholdKind::TempLow | ThresholdKind::HumidityLow => current < threshold,
                };
                crossed.then_some(Breach {
                    kind,
                    current,
                    threshold,
                })
            })
            .collect()
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            temp_min_c: Some(Self::DEFAULT_TEMP_MIN_C),
            temp_max_c: Some(Self::DEFAULT_TEMP_MAX_C),
            humidity_min: Some(Self::DEFAULT_HUMIDITY_MIN),
            humidity_max: Some(Self::DEFAULT_HUMIDITY_MAX),
        }
    }
}

impl fmt::Display for AlertThresholds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
        write!(
            f,
            "temperature {}..{}\u{b0}C, humidity {}..{}%",
            show(self.temp_min_c),
            show(self.temp_max_c),
            show(self.humidity_min),
            show(self.humidity_max),
        )
    }
}

fn check_order(
    (min_field, min): (&'static str, Option<f64>),
    (max_field, max): (&'static str, Option<f64>),
) -> Result<(), ThresholdError> {
    match (min, max) {
        (Some(min), Some(max)) if min >= max => Err(ThresholdError::Inverted {
            min_field,
            min,
            max_field,
            max,
        }),
        _ => Ok(()),
    }
}
