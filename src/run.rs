//! Application execution logic.
//!
//! This module contains the main async sampling loop and the one-shot
//! test delivery used by `roomwatch test`.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use thiserror::Error;
use tokio::signal;
use tokio::time::MissedTickBehavior;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

use roomwatch::alert::{AlertService, Severity};
use roomwatch::config::{SensorChoice, ValidatedConfig, defaults};
use roomwatch::monitor::{Collector, StatusSchedule};
use roomwatch::sensor::{IIO_DEVICES, IioSensor, MockSensor, SensorError, SensorSource};
use roomwatch::time::Clock;
use roomwatch::webhook::{HttpWebhook, ReqwestClient, WebhookSender};

/// Type alias for the application's alert service.
type AppService = AlertService<HttpWebhook<ReqwestClient>>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// No usable sensor could be opened.
    #[error("Failed to open sensor: {0}")]
    SensorUnavailable(#[source] SensorError),

    /// The test message was not accepted by the webhook.
    #[error("Test message could not be delivered to {url}")]
    TestDeliveryFailed {
        /// Masked endpoint URL
        url: String,
    },
}

/// Executes the main application loop.
///
/// This function:
/// 1. Creates the alert service and the sensor
/// 2. Sends a startup event
/// 3. Samples on the configured interval until shutdown signal (Ctrl+C / SIGTERM)
/// 4. Sends a shutdown event
///
/// # Errors
///
/// Returns an error if the configured sensor cannot be opened.
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Sensor hardware or sysfs
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let service = Arc::new(create_service(&config));
    let sensor = create_sensor(&config.sensor, Path::new(IIO_DEVICES))?;
    tracing::info!("Using {} sensor", sensor.name());

    let schedule = create_schedule(&config, SystemTime::now());
    let mut collector = Collector::new(sensor, Arc::clone(&service), schedule);

    if !config.endpoint.is_active() {
        tracing::warn!("Webhook not configured or disabled, alerts will only be logged");
    }

    service
        .send_system_event(
            "startup",
            &format!(
                "roomwatch started, sampling every {}s",
                config.sampling_interval.as_secs()
            ),
            Severity::Info,
        )
        .await;

    run_loop(&mut collector, config.sampling_interval, shutdown_signal()).await;

    service
        .send_system_event("shutdown", "roomwatch stopped", Severity::Warning)
        .await;

    Ok(())
}

/// Sends one test message and reports whether it was delivered.
///
/// # Errors
///
/// Returns [`RunError::TestDeliveryFailed`] if the webhook is unconfigured,
/// disabled, or rejected every attempt.
pub async fn send_test(config: &ValidatedConfig) -> Result<(), RunError> {
    deliver_test(&create_service(config)).await
}

async fn deliver_test<W, C>(service: &AlertService<W, C>) -> Result<(), RunError>
where
    W: WebhookSender,
    C: Clock + Clone,
{
    let url = service.endpoint().masked_url();

    if service.send_test_message().await {
        tracing::info!("Test message delivered to {url}");
        Ok(())
    } else {
        Err(RunError::TestDeliveryFailed { url })
    }
}

/// Creates the alert service backed by the HTTP webhook sender.
fn create_service(config: &ValidatedConfig) -> AppService {
    AlertService::new(
        config.alert_settings(),
        config.cooldown,
        HttpWebhook::new(ReqwestClient::new()),
    )
}

/// Opens the configured sensor. `iio_root` is searched when no device is given.
fn create_sensor(
    choice: &SensorChoice,
    iio_root: &Path,
) -> Result<Box<dyn SensorSource>, RunError> {
    match choice {
        SensorChoice::Mock => Ok(Box::new(MockSensor::default())),
        SensorChoice::Iio(Some(device)) => Ok(Box::new(IioSensor::new(device.clone()))),
        SensorChoice::Iio(None) => {
            let sensor = IioSensor::discover(iio_root).map_err(RunError::SensorUnavailable)?;
            tracing::info!("Discovered IIO device: {}", sensor.device().display());
            Ok(Box::new(sensor))
        }
    }
}

/// Builds the status update schedule from configuration.
fn create_schedule(config: &ValidatedConfig, now: SystemTime) -> StatusSchedule {
    StatusSchedule::new(
        config.status_updates,
        config.status_interval,
        config.sampling_interval,
        config.status_on_startup,
        now,
    )
}

/// Samples every `sampling` until `shutdown` completes.
///
/// A failed read pauses for [`defaults::SENSOR_RETRY_DELAY`] and then
/// samples again without waiting for the next interval.
async fn run_loop<S, W, C, F>(collector: &mut Collector<S, W, C>, sampling: Duration, shutdown: F)
where
    S: SensorSource,
    W: WebhookSender,
    C: Clock + Clone,
    F: Future<Output = ()>,
{
    let mut interval = tokio::time::interval(sampling);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = IntervalStream::new(interval);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping...");
                return;
            }

            Some(_) = ticks.next() => {
                match collector.tick().await {
                    Ok(tick) => {
                        if !tick.alerts.is_empty() {
                            tracing::info!(alerts = ?tick.alerts, "Alerts processed");
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Sensor read failed: {e}");

                        tokio::select! {
                            biased;

                            () = &mut shutdown => {
                                tracing::info!("Shutdown signal received, stopping...");
                                return;
                            }

                            () = tokio::time::sleep(defaults::SENSOR_RETRY_DELAY) => {
                                ticks.as_mut().reset_immediately();
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
