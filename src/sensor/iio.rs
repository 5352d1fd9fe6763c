use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{CPU_THERMAL_ZONE, Reading, SensorError, SensorSource, read_cpu_temp, read_milli};

const TEMP_CHANNEL: &str = "in_temp_input";
const HUMIDITY_CHANNEL: &str = "in_humidityrelative_input";

/// Default IIO device directory.
pub const IIO_DEVICES: &str = "/sys/bus/iio/devices";

/// Temperature/humidity chip exposed through the Linux IIO subsystem.
///
/// Both channels are read from processed `*_input` files holding
/// thousandths of a degree and of a percent.
#[derive(Debug, Clone)]
pub struct IioSensor {
    device: PathBuf,
    cpu_zone: Option<PathBuf>,
}

impl IioSensor {
    /// Reads from the given device directory and the default CPU zone.
    #[must_use]
    pub fn new(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
            cpu_zone: Some(PathBuf::from(CPU_THERMAL_ZONE)),
        }
    }

    /// Overrides or disables the CPU thermal zone.
    #[must_use]
    pub fn with_cpu_zone(mut self, zone: Option<PathBuf>) -> Self {
        self.cpu_zone = zone;
        self
    }

    /// Returns the device directory.
    #[must_use]
    pub fn device(&self) -> &Path {
        &self.device
    }

    /// Finds the first device under `root` exposing both channels.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::DeviceNotFound`] if no device qualifies and
    /// [`SensorError::Io`] if `root` cannot be listed.
    pub fn discover(root: &Path) -> Result<Self, SensorError> {
        let entries = std::fs::read_dir(root).map_err(|source| SensorError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let mut devices: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|dir| dir.join(TEMP_CHANNEL).is_file() && dir.join(HUMIDITY_CHANNEL).is_file())
            .collect();
        devices.sort();

        let device = devices
            .into_iter()
            .next()
            .ok_or_else(|| SensorError::DeviceNotFound(root.to_path_buf()))?;

        tracing::info!(device = %device.display(), "Using IIO sensor");
        Ok(Self::new(device))
    }
}

impl SensorSource for IioSensor {
    fn read(&self, at: SystemTime) -> Result<Reading, SensorError> {
        let temperature = read_milli(&self.device.join(TEMP_CHANNEL))?;
        let humidity = read_milli(&self.device.join(HUMIDITY_CHANNEL))?;
        let cpu = self.cpu_zone.as_deref().and_then(read_cpu_temp);

        Ok(Reading::new(temperature, humidity, cpu, at))
    }

    fn name(&self) -> &'static str {
        "iio"
    }
}
