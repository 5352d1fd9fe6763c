//! Runtime-swappable alert settings.

use parking_lot::Mutex;

use super::thresholds::{AlertThresholds, ThresholdError};
use crate::webhook::{EndpointConfig, EndpointError, EndpointUpdate};

/// A consistent snapshot of everything delivery depends on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertSettings {
    /// Where alerts go
    pub endpoint: EndpointConfig,
    /// When alerts fire
    pub thresholds: AlertThresholds,
}

/// Holds the current [`AlertSettings`] and swaps them atomically.
///
/// Readers always get a complete snapshot; a setter either replaces a
/// whole section after validation or leaves it untouched.
#[derive(Debug, Default)]
pub struct SettingsHolder {
    current: Mutex<AlertSettings>,
}

impl SettingsHolder {
    /// Creates a holder from already-validated settings.
    #[must_use]
    pub fn new(settings: AlertSettings) -> Self {
        Self {
            current: Mutex::new(settings),
        }
    }

    /// Returns a snapshot of the current settings.
    #[must_use]
    pub fn get(&self) -> AlertSettings {
        self.current.lock().clone()
    }

    /// Returns the current endpoint.
    #[must_use]
    pub fn endpoint(&self) -> EndpointConfig {
        self.current.lock().endpoint.clone()
    }

    /// Returns the current thresholds.
    #[must_use]
    pub fn thresholds(&self) -> AlertThresholds {
        self.current.lock().thresholds
    }

    /// Replaces the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] and keeps the previous endpoint if
    /// `endpoint` is out of range.
    pub fn set_endpoint(&self, endpoint: EndpointConfig) -> Result<(), EndpointError> {
        endpoint.validate()?;
        tracing::info!(endpoint = %endpoint, "Webhook endpoint updated");
        self.current.lock().endpoint = endpoint;
        Ok(())
    }

    /// Merges `update` over the current endpoint and swaps in the result.
    ///
    /// The merge happens under the lock, so concurrent partial updates
    /// never lose each other's fields.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError`] and keeps the previous endpoint if the
    /// merged configuration is invalid.
    pub fn update_endpoint(&self, update: &EndpointUpdate) -> Result<EndpointConfig, EndpointError> {
        let merged = {
            let mut current = self.current.lock();
            let merged = update.apply(&current.endpoint)?;
            current.endpoint = merged.clone();
            merged
        };
        tracing::info!(endpoint = %merged, "Webhook endpoint updated");
        Ok(merged)
    }

    /// Replaces the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ThresholdError`] and keeps the previous thresholds if
    /// `thresholds` are not finite or a pair is inverted.
    pub fn set_thresholds(&self, thresholds: AlertThresholds) -> Result<(), ThresholdError> {
        thresholds.validate()?;
        tracing::info!(thresholds = %thresholds, "Alert thresholds updated");
        self.current.lock().thresholds = thresholds;
        Ok(())
    }
}
