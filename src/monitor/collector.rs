//! One sampling step: read, evaluate, report.

use std::sync::Arc;

use super::StatusSchedule;
use crate::alert::{AlertOutcome, AlertService};
use crate::sensor::{Reading, SensorError, SensorSource};
use crate::time::{Clock, SystemClock};
use crate::webhook::WebhookSender;

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// The sample taken
    pub reading: Reading,
    /// Alerts attempted for this sample
    pub alerts: AlertOutcome,
    /// `Some(delivered)` if a status update went out
    pub status_update: Option<bool>,
}

/// Drives a sensor through the alert service.
///
/// # Type Parameters
///
/// - `S`: The sensor
/// - `W`: The webhook sender behind the service
/// - `C`: The clock (defaults to [`SystemClock`])
pub struct Collector<S, W, C = SystemClock> {
    sensor: S,
    service: Arc<AlertService<W, C>>,
    schedule: StatusSchedule,
    clock: C,
}

impl<S, W> Collector<S, W, SystemClock>
where
    S: SensorSource,
    W: WebhookSender,
{
    /// Creates a collector on the system clock.
    #[must_use]
    pub const fn new(sensor: S, service: Arc<AlertService<W>>, schedule: StatusSchedule) -> Self {
        Self::with_clock(sensor, service, schedule, SystemClock)
    }
}

impl<S, W, C> Collector<S, W, C>
where
    S: SensorSource,
    W: WebhookSender,
    C: Clock + Clone,
{
    /// Creates a collector with an explicit clock.
    #[must_use]
    pub const fn with_clock(
        sensor: S,
        service: Arc<AlertService<W, C>>,
        schedule: StatusSchedule,
        clock: C,
    ) -> Self {
        Self {
            sensor,
            service,
            schedule,
            clock,
        }
    }

    /// Returns the alert service.
    #[must_use]
    pub const fn service(&self) -> &Arc<AlertService<W, C>> {
        &self.service
    }

    /// Returns the sensor.
    #[must_use]
    pub const fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Takes one sample, evaluates it and sends a status update if due.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError`] if the sensor could not be read; nothing is
    /// evaluated or sent in that case.
    pub async fn tick(&mut self) -> Result<Tick, SensorError> {
        let now = self.clock.now();
        let reading = self.sensor.read(now)?;

        tracing::info!(
            temperature_c = reading.temperature_c,
            humidity = reading.humidity,
            cpu_temp_c = ?reading.cpu_temp_c,
            "Sensor reading"
        );

        let alerts = self
            .service
            .evaluate(reading.temperature_c, reading.humidity, &reading.timestamp)
            .await;

        let status_update = if self.schedule.is_due(now) {
            self.schedule.mark(now);
            let sent = self
                .service
                .send_status_update(
                    reading.temperature_c,
                    reading.humidity,
                    reading.cpu_temp_c,
                    &reading.timestamp,
                )
                .await;
            tracing::debug!(sent, "Status update processed");
            Some(sent)
        } else {
            None
        };

        Ok(Tick {
            reading,
            alerts,
            status_update,
        })
    }
}
