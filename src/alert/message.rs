//! Chat message formatting.
//!
//! Builds the Slack-compatible attachment payload for alerts, status
//! updates and system events. Everything here is pure: the only time
//! input is the `at` argument, which supplies the attachment `ts` and the
//! system event timestamp field.

use std::time::SystemTime;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use super::kind::AlertKind;
use crate::time::unix_seconds;

/// Timestamp layout shared with sensor readings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Attachment side-bar color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Green
    Good,
    /// Yellow
    Warning,
    /// Red
    Danger,
    /// Any `#rrggbb` value accepted by the chat service
    Hex(String),
}

impl Color {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Hex(hex) => hex,
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Severity of a system event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Routine lifecycle notice
    #[default]
    Info,
    /// Something needs attention
    Warning,
    /// Something failed
    Error,
}

impl Severity {
    /// Maps the severity onto an attachment color.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Good,
            Self::Warning => Color::Warning,
            Self::Error => Color::Danger,
        }
    }
}

/// Unit of a rendered reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Degrees Celsius, rendered with a Fahrenheit companion
    Celsius,
    /// Relative humidity percent
    Percent,
}

impl Unit {
    /// Renders `value` in this unit.
    #[must_use]
    pub fn render(self, value: f64) -> String {
        match self {
            Self::Celsius => format!(
                "{}\u{b0}C ({}\u{b0}F)",
                format_number(value),
                format_number(celsius_to_fahrenheit(value))
            ),
            Self::Percent => format!("{}%", format_number(value)),
        }
    }

    const fn current_title(self) -> &'static str {
        match self {
            Self::Celsius => "Current Temperature",
            Self::Percent => "Current Humidity",
        }
    }
}

/// One labelled value inside an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Label
    pub title: String,
    /// Rendered value
    pub value: String,
    /// Whether the chat client may lay the field out side by side
    pub short: bool,
}

impl Field {
    /// Creates a field.
    #[must_use]
    pub fn new(title: impl Into<String>, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short,
        }
    }
}

/// A single message attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    /// Side-bar color
    pub color: Color,
    /// Message text (Slack markdown)
    pub text: String,
    /// Unix seconds shown as the message time
    pub ts: i64,
    /// Ordered fields; omitted from the JSON when empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

/// The outbound wire payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    /// Always exactly one attachment for messages built here
    pub attachments: Vec<Attachment>,
}

impl Payload {
    /// Wraps a single attachment.
    #[must_use]
    pub fn message(
        text: impl Into<String>,
        color: Color,
        fields: Vec<Field>,
        at: SystemTime,
    ) -> Self {
        Self {
            attachments: vec![Attachment {
                color,
                text: text.into(),
                ts: unix_seconds(at),
                fields,
            }],
        }
    }

    /// Returns the first attachment.
    #[must_use]
    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachments.first()
    }
}

/// Converts Celsius to Fahrenheit, rounded to one decimal place.
#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    round1(celsius * 9.0 / 5.0 + 32.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Renders a reading the way the dashboard shows it: integral values keep
/// one decimal (`30.0`), others use their shortest exact form (`22.55`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// Formats a local wall-clock timestamp.
#[must_use]
pub fn format_timestamp(at: SystemTime) -> String {
    DateTime::<Local>::from(at).format(TIMESTAMP_FORMAT).to_string()
}

/// Builds a threshold alert.
///
/// Fields are always `[current, threshold, timestamp]`.
#[must_use]
pub fn format_alert(
    kind: &AlertKind,
    current: f64,
    threshold: f64,
    unit: Unit,
    timestamp: &str,
    at: SystemTime,
) -> Payload {
    let (text, color) = match kind {
        AlertKind::Threshold(kind) => (kind.headline().to_string(), kind.color()),
        AlertKind::Custom(label) => (
            format!("\u{1f514} *Alert: {}*", label.to_uppercase()),
            Color::Warning,
        ),
    };

    let fields = vec![
        Field::new(unit.current_title(), unit.render(current), true),
        Field::new("Threshold", unit.render(threshold), true),
        Field::new("Timestamp", timestamp, false),
    ];

    Payload::message(text, color, fields, at)
}

/// Builds a periodic status update.
///
/// Fields are `[Temperature, Humidity, CPU Temperature, Last Updated]`;
/// the CPU field is left out entirely when no CPU reading exists.
#[must_use]
pub fn format_status_update(
    temperature_c: f64,
    humidity: f64,
    cpu_temp_c: Option<f64>,
    timestamp: &str,
    at: SystemTime,
) -> Payload {
    let mut fields = vec![
        Field::new("Temperature", Unit::Celsius.render(temperature_c), true),
        Field::new("Humidity", Unit::Percent.render(humidity), true),
    ];

    if let Some(cpu) = cpu_temp_c {
        fields.push(Field::new(
            "CPU Temperature",
            format!("{}\u{b0}C", format_number(cpu)),
            true,
        ));
    }

    fields.push(Field::new("Last Updated", timestamp, false));

    Payload::message(
        "\u{1f4ca} *Server Room Status Update*",
        Color::Good,
        fields,
        at,
    )
}

/// Builds a notification about the monitor's own lifecycle.
#[must_use]
pub fn format_system_event(
    event_type: &str,
    message: &str,
    severity: Severity,
    at: SystemTime,
) -> Payload {
    let text = format!(
        "{} *System Event: {}*\n{message}",
        event_icon(event_type),
        event_type.to_uppercase()
    );

    let fields = vec![Field::new("Timestamp", format_timestamp(at), false)];

    Payload::message(text, severity.color(), fields, at)
}

fn event_icon(event_type: &str) -> &'static str {
    match event_type {
        "startup" => "\u{1f680}",
        "shutdown" => "\u{1f6d1}",
        "error" => "\u{26a0}\u{fe0f}",
        "info" => "\u{2139}\u{fe0f}",
        _ => "\u{1f4e2}",
    }
}
