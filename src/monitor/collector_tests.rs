//! Tests for `Collector`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use super::{Collector, StatusSchedule};
use crate::alert::{AlertService, AlertSettings, AlertThresholds, ThresholdKind};
use crate::sensor::{Reading, SensorError, SensorSource};
use crate::test_helpers::{ManualClock, RecordingSleeper, ScriptedClient, test_url};
use crate::webhook::{EndpointConfig, HttpWebhook};

const START: u64 = 1_767_096_000;

/// Sensor that replays fixed samples and fails once they run out.
struct ScriptedSensor {
    samples: Mutex<VecDeque<(f64, f64)>>,
}

impl ScriptedSensor {
    fn new(samples: &[(f64, f64)]) -> Self {
        Self {
            samples: Mutex::new(samples.iter().copied().collect()),
        }
    }
}

impl SensorSource for ScriptedSensor {
    fn read(&self, at: SystemTime) -> Result<Reading, SensorError> {
        let (temperature, humidity) = self
            .samples
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| SensorError::DeviceNotFound("scripted".into()))?;
        Ok(Reading::new(temperature, humidity, Some(50.0), at))
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

type TestCollector =
    Collector<ScriptedSensor, HttpWebhook<ScriptedClient, RecordingSleeper>, ManualClock>;

fn collector(
    samples: &[(f64, f64)],
    schedule: StatusSchedule,
) -> (TestCollector, ScriptedClient, ManualClock) {
    let client = ScriptedClient::ok();
    let clock = ManualClock::new(START);
    let webhook = HttpWebhook::new(client.clone()).with_sleeper(RecordingSleeper::default());
    let service = AlertService::with_clock(
        AlertSettings {
            endpoint: EndpointConfig::new(test_url()),
            thresholds: AlertThresholds {
                temp_max_c: Some(27.0),
                ..AlertThresholds::default()
            },
        },
        Duration::from_secs(900),
        webhook,
        clock.clone(),
    );

    (
        Collector::with_clock(
            ScriptedSensor::new(samples),
            Arc::new(service),
            schedule,
            clock.clone(),
        ),
        client,
        clock,
    )
}

fn hourly(on_startup: bool) -> StatusSchedule {
    StatusSchedule::new(
        true,
        Duration::from_secs(3600),
        Duration::from_secs(60),
        on_startup,
        SystemTime::UNIX_EPOCH + Duration::from_secs(START),
    )
}

#[tokio::test]
async fn quiet_reading_sends_nothing() {
    let (mut collector, client, _) = collector(&[(22.0, 50.0)], StatusSchedule::disabled());

    let tick = collector.tick().await.unwrap();

    assert!(tick.alerts.is_empty());
    assert_eq!(tick.status_update, None);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn breach_is_alerted_with_reading_timestamp() {
    let (mut collector, client, _) = collector(&[(30.0, 50.0)], StatusSchedule::disabled());

    let tick = collector.tick().await.unwrap();

    assert_eq!(tick.alerts.get(ThresholdKind::TempHigh), Some(true));
    let fields = &client.json_bodies()[0]["attachments"][0]["fields"];
    assert_eq!(fields[2]["value"], tick.reading.timestamp.as_str());
}

#[tokio::test]
async fn startup_status_update_goes_out_on_first_tick() {
    let (mut collector, client, clock) =
        collector(&[(22.0, 50.0), (22.0, 50.0)], hourly(true));

    let first = collector.tick().await.unwrap();
    clock.advance(Duration::from_secs(60));
    let second = collector.tick().await.unwrap();

    assert_eq!(first.status_update, Some(true));
    assert_eq!(second.status_update, None);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn status_update_waits_for_interval_without_startup_flag() {
    let (mut collector, client, clock) =
        collector(&[(22.0, 50.0), (22.0, 50.0)], hourly(false));

    let first = collector.tick().await.unwrap();
    clock.advance(Duration::from_secs(3600));
    let second = collector.tick().await.unwrap();

    assert_eq!(first.status_update, None);
    assert_eq!(second.status_update, Some(true));
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn status_update_and_alert_share_a_tick() {
    let (mut collector, client, _) = collector(&[(30.0, 50.0)], hourly(true));

    let tick = collector.tick().await.unwrap();

    assert_eq!(tick.alerts.len(), 1);
    assert_eq!(tick.status_update, Some(true));
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn sensor_failure_sends_nothing() {
    let (mut collector, client, _) = collector(&[], hourly(true));

    let result = collector.tick().await;

    assert!(matches!(result, Err(SensorError::DeviceNotFound(_))));
    assert_eq!(client.calls(), 0);
}
