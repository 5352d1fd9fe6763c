use std::f64::consts::TAU;
use std::time::SystemTime;

use super::{Reading, SensorError, SensorSource};
use crate::time::elapsed_between;

const BASE_TEMP_C: f64 = 22.0;
const BASE_HUMIDITY: f64 = 45.0;
const CPU_TEMP_C: f64 = 55.0;

/// Simulated sensor for machines without hardware.
///
/// Temperature follows a 24-hour cycle of 2 °C above the base and humidity
/// a slower swing of 10 %, both derived from the time since `start` so a
/// given instant always yields the same sample.
#[derive(Debug, Clone, Copy)]
pub struct MockSensor {
    start: SystemTime,
}

impl MockSensor {
    /// Creates a mock whose cycles start at `start`.
    #[must_use]
    pub const fn starting_at(start: SystemTime) -> Self {
        Self { start }
    }
}

impl Default for MockSensor {
    fn default() -> Self {
        Self::starting_at(SystemTime::now())
    }
}

impl SensorSource for MockSensor {
    fn read(&self, at: SystemTime) -> Result<Reading, SensorError> {
        let hours = elapsed_between(self.start, at).as_secs_f64() / 3600.0;

        let temperature = BASE_TEMP_C + 2.0 * wave(hours * TAU / 24.0);
        let humidity = (BASE_HUMIDITY + 10.0 * wave(hours / 2.0)).clamp(20.0, 80.0);

        Ok(Reading::new(temperature, humidity, Some(CPU_TEMP_C), at))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

// Sine mapped onto 0..=1.
fn wave(radians: f64) -> f64 {
    0.5f64.mul_add(radians.sin(), 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn first_sample_sits_mid_cycle() {
        let sensor = MockSensor::starting_at(at(0));

        let reading = sensor.read(at(0)).unwrap();

        assert!((reading.temperature_c - 23.0).abs() < 1e-9);
        assert!((reading.humidity - 50.0).abs() < 1e-9);
        assert_eq!(reading.cpu_temp_c, Some(55.0));
    }

    #[test]
    fn same_instant_gives_same_sample() {
        let sensor = MockSensor::starting_at(at(0));

        assert_eq!(sensor.read(at(4_000)).unwrap(), sensor.read(at(4_000)).unwrap());
    }

    #[test]
    fn values_stay_in_plausible_range() {
        let sensor = MockSensor::starting_at(at(0));

        for hour in 0..48 {
            let reading = sensor.read(at(hour * 3_600)).unwrap();
            assert!((22.0..=24.0).contains(&reading.temperature_c));
            assert!((45.0..=55.0).contains(&reading.humidity));
        }
    }

    #[test]
    fn default_thresholds_never_fire_on_mock_data() {
        let sensor = MockSensor::starting_at(at(0));
        let thresholds = crate::alert::AlertThresholds::default();

        for hour in 0..48 {
            let reading = sensor.read(at(hour * 3_600)).unwrap();
            assert!(
                thresholds
                    .breaches(reading.temperature_c, reading.humidity)
                    .is_empty()
            );
        }
    }
}
