//! Alert kinds.

use std::fmt;

use serde::Serialize;

use super::message::{Color, Unit};

/// One of the four threshold-breach categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    /// Temperature above `temp_max_c`
    TempHigh,
    /// Temperature below `temp_min_c`
    TempLow,
    /// Humidity above `humidity_max`
    HumidityHigh,
    /// Humidity below `humidity_min`
    HumidityLow,
}

impl ThresholdKind {
    /// Every threshold kind, in evaluation order.
    pub const ALL: [Self; 4] = [
        Self::TempHigh,
        Self::TempLow,
        Self::HumidityHigh,
        Self::HumidityLow,
    ];

    /// Stable identifier used as cooldown key and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TempHigh => "temp_high",
            Self::TempLow => "temp_low",
            Self::HumidityHigh => "humidity_high",
            Self::HumidityLow => "humidity_low",
        }
    }

    /// Unit the breached reading is measured in.
    #[must_use]
    pub const fn unit(self) -> Unit {
        match self {
            Self::TempHigh | Self::TempLow => Unit::Celsius,
            Self::HumidityHigh | Self::HumidityLow => Unit::Percent,
        }
    }

    /// Attachment color; only overheating is treated as critical.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::TempHigh => Color::Danger,
            Self::TempLow | Self::HumidityHigh | Self::HumidityLow => Color::Warning,
        }
    }

    /// Headline of the alert message.
    #[must_use]
    pub const fn headline(self) -> &'static str {
        match self {
            Self::TempHigh => "\u{1f525} *Temperature Alert: HIGH*",
            Self::TempLow => "\u{2744}\u{fe0f} *Temperature Alert: LOW*",
            Self::HumidityHigh => "\u{1f4a7} *Humidity Alert: HIGH*",
            Self::HumidityLow => "\u{1f3dc}\u{fe0f} *Humidity Alert: LOW*",
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of the cooldown map: a threshold kind or a caller-supplied label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertKind {
    /// A built-in threshold breach
    Threshold(ThresholdKind),
    /// An ad-hoc alert raised by a caller (for example a manual test)
    Custom(String),
}

impl AlertKind {
    /// Creates a custom kind.
    #[must_use]
    pub fn custom(label: impl Into<String>) -> Self {
        Self::Custom(label.into())
    }

    /// Returns the identifier used in logs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Threshold(kind) => kind.as_str(),
            Self::Custom(label) => label,
        }
    }
}

impl From<ThresholdKind> for AlertKind {
    fn from(kind: ThresholdKind) -> Self {
        Self::Threshold(kind)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
