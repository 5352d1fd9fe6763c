//! Alert evaluation and notification.
//!
//! This module provides:
//! - Threshold checks over temperature and humidity ([`AlertThresholds`])
//! - Per-kind rate limiting ([`CooldownTracker`])
//! - Chat payload formatting ([`format_alert`], [`format_status_update`],
//!   [`format_system_event`])
//! - Runtime-swappable settings ([`SettingsHolder`])
//! - The service tying them to a [`crate::webhook::WebhookSender`] ([`AlertService`])

mod cooldown;
mod kind;
mod message;
mod service;
mod settings;
mod thresholds;


pub use cooldown::CooldownTracker;
pub use kind::{AlertKind, ThresholdKind};
pub use message::{
    Attachment, Color, Field, Payload, Severity, TIMESTAMP_FORMAT, Unit, celsius_to_fahrenheit,
    format_alert, format_number, format_status_update, format_system_event, format_timestamp,
};
pub use service::{AlertOutcome, AlertService};
pub use settings::{AlertSettings, SettingsHolder};
pub use thresholds::{AlertThresholds, Breach, ThresholdError};
