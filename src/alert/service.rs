//! The alert service.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use super::cooldown::CooldownTracker;
use super::kind::{AlertKind, ThresholdKind};
use super::message::{
    Payload, Severity, Unit, format_alert, format_status_update, format_system_event,
};
use super::settings::{AlertSettings, SettingsHolder};
use super::thresholds::{AlertThresholds, ThresholdError};
use crate::time::{Clock, SystemClock};
use crate::webhook::{EndpointConfig, EndpointError, EndpointUpdate, WebhookSender};

/// Delivery result per threshold kind that was attempted.
///
/// Kinds that did not breach and kinds held back by the cooldown are both
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AlertOutcome {
    results: BTreeMap<ThresholdKind, bool>,
}

impl AlertOutcome {
    /// Returns true if `kind` was attempted.
    #[must_use]
    pub fn contains(&self, kind: ThresholdKind) -> bool {
        self.results.contains_key(&kind)
    }

    /// Returns whether the attempt for `kind` was delivered.
    #[must_use]
    pub fn get(&self, kind: ThresholdKind) -> Option<bool> {
        self.results.get(&kind).copied()
    }

    /// Returns true if nothing was attempted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of attempted kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Iterates attempted kinds in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (ThresholdKind, bool)> + '_ {
        self.results.iter().map(|(kind, sent)| (*kind, *sent))
    }

    fn record(&mut self, kind: ThresholdKind, sent: bool) {
        self.results.insert(kind, sent);
    }
}

/// Evaluates readings and delivers alerts, status updates and events.
///
/// Construct one per process and share it behind an `Arc`. Failures are
/// logged and reported as `false`; nothing here returns a delivery error.
///
/// # Type Parameters
///
/// - `W`: The webhook sender
/// - `C`: The clock used for cooldowns and message timestamps
#[derive(Debug)]
pub struct AlertService<W, C = SystemClock> {
    settings: SettingsHolder,
    cooldown: CooldownTracker<C>,
    sender: W,
    clock: C,
}

impl<W: WebhookSender> AlertService<W, SystemClock> {
    /// Creates a service on the system clock.
    #[must_use]
    pub fn new(settings: AlertSettings, cooldown: Duration, sender: W) -> Self {
        Self::with_clock(settings, cooldown, sender, SystemClock)
    }
}

impl<W: WebhookSender, C: Clock + Clone> AlertService<W, C> {
    /// Creates a service with an explicit clock.
    #[must_use]
    pub fn with_clock(settings: AlertSettings, cooldown: Duration, sender: W, clock: C) -> Self {
        Self {
            settings: SettingsHolder::new(settings),
            cooldown: CooldownTracker::with_clock(cooldown, clock.clone()),
            sender,
            clock,
        }
    }

    /// Returns the settings holder.
    #[must_use]
    pub const fn settings(&self) -> &SettingsHolder {
        &self.settings
    }

    /// Returns the cooldown tracker.
    #[must_use]
    pub const fn cooldown(&self) -> &CooldownTracker<C> {
        &self.cooldown
    }

    /// Returns the sender.
    #[must_use]
    pub const fn sender(&self) -> &W {
        &self.sender
    }

    /// Returns the current endpoint.
    #[must_use]
    pub fn endpoint(&self) -> EndpointConfig {
        self.settings.endpoint()
    }

    /// Returns the current thresholds.
    #[must_use]
    pub fn thresholds(&self) -> AlertThresholds {
        self.settings.thresholds()
    }

    /// See [`SettingsHolder::set_endpoint`].
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] if `endpoint` is invalid.
    pub fn set_endpoint(&self, endpoint: EndpointConfig) -> Result<(), EndpointError> {
        self.settings.set_endpoint(endpoint)
    }

    /// See [`SettingsHolder::update_endpoint`].
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] if the merged endpoint is invalid.
    pub fn update_endpoint(&self, update: &EndpointUpdate) -> Result<EndpointConfig, EndpointError> {
        self.settings.update_endpoint(update)
    }

    /// See [`SettingsHolder::set_thresholds`].
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] if `thresholds` are invalid.
    pub fn set_thresholds(&self, thresholds: AlertThresholds) -> Result<(), ThresholdError> {
        self.settings.set_thresholds(thresholds)
    }

    /// Checks a reading against the current thresholds and alerts on
    /// every breach whose cooldown is open.
    ///
    /// The cooldown is consumed when the attempt starts, so a failed
    /// delivery is not retried until the window passes.
    pub async fn evaluate(&self, temperature_c: f64, humidity: f64, timestamp: &str) -> AlertOutcome {
        let breaches = self.settings.thresholds().breaches(temperature_c, humidity);
        let mut outcome = AlertOutcome::default();

        for breach in breaches {
            let sent = self
                .send_alert(
                    &breach.kind.into(),
                    breach.current,
                    breach.threshold,
                    breach.kind.unit(),
                    timestamp,
                )
                .await;

            if let Some(sent) = sent {
                outcome.record(breach.kind, sent);
            }
        }

        if !outcome.is_empty() {
            tracing::info!(outcome = ?outcome, "Threshold alerts processed");
        }

        outcome
    }

    /// Sends one alert if the cooldown for `kind` is open.
    ///
    /// Returns `None` when the cooldown held the alert back, otherwise
    /// whether it was delivered.
    pub async fn send_alert(
        &self,
        kind: &AlertKind,
        current: f64,
        threshold: f64,
        unit: Unit,
        timestamp: &str,
    ) -> Option<bool> {
        if !self.cooldown.try_acquire(kind) {
            tracing::debug!(kind = %kind, "Alert suppressed by cooldown");
            return None;
        }

        let payload = format_alert(kind, current, threshold, unit, timestamp, self.clock.now());
        Some(self.deliver(&payload).await)
    }

    /// Sends a status update. Not subject to the cooldown.
    pub async fn send_status_update(
        &self,
        temperature_c: f64,
        humidity: f64,
        cpu_temp_c: Option<f64>,
        timestamp: &str,
    ) -> bool {
        let payload =
            format_status_update(temperature_c, humidity, cpu_temp_c, timestamp, self.clock.now());
        self.deliver(&payload).await
    }

    /// Sends a lifecycle notification. Not subject to the cooldown.
    pub async fn send_system_event(&self, event_type: &str, message: &str, severity: Severity) -> bool {
        let payload = format_system_event(event_type, message, severity, self.clock.now());
        self.deliver(&payload).await
    }

    /// Sends a test event through the full retry path.
    pub async fn send_test_message(&self) -> bool {
        self.send_system_event(
            "info",
            "Test message from roomwatch. Webhook delivery is working.",
            Severity::Info,
        )
        .await
    }

    /// Delivers `payload` to the endpoint current at call time.
    pub async fn deliver(&self, payload: &Payload) -> bool {
        let endpoint = self.settings.endpoint();

        match self.sender.send(&endpoint, payload).await {
            Ok(()) => true,
            Err(e) if e.is_skipped() => {
                tracing::debug!(url = %endpoint.masked_url(), "Delivery skipped: {e}");
                false
            }
            Err(e) => {
                tracing::error!(url = %endpoint.masked_url(), "Delivery failed: {e}");
                false
            }
        }
    }
}
