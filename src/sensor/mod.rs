//! Sensor readings.
//!
//! A [`SensorSource`] produces one [`Reading`] per call. Two sources exist:
//! [`MockSensor`] for development machines and [`IioSensor`] for a
//! humidity/temperature chip exposed through the Linux IIO subsystem.

mod iio;
mod mock;

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use thiserror::Error;

use crate::alert::format_timestamp;

pub use iio::{IIO_DEVICES, IioSensor};
pub use mock::MockSensor;

/// Default thermal zone reporting the SoC temperature.
pub const CPU_THERMAL_ZONE: &str = "/sys/class/thermal/thermal_zone0/temp";

/// Error raised when a sensor cannot be read.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The value file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The value file did not hold a number.
    #[error("Unexpected contents in {}: {contents:?}", .path.display())]
    Parse {
        /// File that held the value
        path: PathBuf,
        /// What was found
        contents: String,
    },

    /// No device with the required channels was found.
    #[error("No IIO device with temperature and humidity channels under {}", .0.display())]
    DeviceNotFound(PathBuf),
}

/// One environmental sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Ambient temperature (°C)
    pub temperature_c: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// SoC temperature (°C), when the board exposes one
    pub cpu_temp_c: Option<f64>,
    /// Local wall-clock time of the sample
    pub timestamp: String,
}

impl Reading {
    /// Builds a reading, rounding each value to one decimal place.
    #[must_use]
    pub fn new(temperature_c: f64, humidity: f64, cpu_temp_c: Option<f64>, at: SystemTime) -> Self {
        Self {
            temperature_c: round1(temperature_c),
            humidity: round1(humidity),
            cpu_temp_c: cpu_temp_c.map(round1),
            timestamp: format_timestamp(at),
        }
    }
}

/// A source of environmental readings.
pub trait SensorSource: Send + Sync {
    /// Takes a sample stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError`] if the hardware could not be read.
    fn read(&self, at: SystemTime) -> Result<Reading, SensorError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<S: SensorSource + ?Sized> SensorSource for Box<S> {
    fn read(&self, at: SystemTime) -> Result<Reading, SensorError> {
        (**self).read(at)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Reads a sysfs thermal zone in millidegrees and returns °C.
///
/// Returns `None` on boards without the file or with garbage in it.
#[must_use]
pub fn read_cpu_temp(path: &Path) -> Option<f64> {
    match read_milli(path) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("CPU temperature unavailable: {e}");
            None
        }
    }
}

/// Reads a file holding an integer in thousandths and scales it.
pub(crate) fn read_milli(path: &Path) -> Result<f64, SensorError> {
    let contents = std::fs::read_to_string(path).map_err(|source| SensorError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    contents
        .trim()
        .parse::<f64>()
        .map(|milli| milli / 1000.0)
        .map_err(|_| SensorError::Parse {
            path: path.to_path_buf(),
            contents: contents.trim().to_string(),
        })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
