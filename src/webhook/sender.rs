//! Webhook sender trait and the retrying HTTP implementation.

use crate::alert::Payload;
use crate::time::{Sleeper, TokioSleeper};

use super::{EndpointConfig, HttpClient, HttpError, HttpRequest, RetryableError, WebhookError};

/// Trait for delivering a chat payload to an endpoint.
///
/// Implementations handle retries internally, returning
/// [`WebhookError::MaxRetriesExceeded`] when the whole budget fails.
pub trait WebhookSender: Send + Sync {
    /// Delivers `payload` to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError::NotConfigured`] or [`WebhookError::Disabled`]
    /// without performing any I/O, otherwise the error that ended delivery.
    fn send(
        &self,
        endpoint: &EndpointConfig,
        payload: &Payload,
    ) -> impl std::future::Future<Output = Result<(), WebhookError>> + Send;
}

/// HTTP webhook sender with exponential backoff.
///
/// The endpoint is passed per call rather than stored, so a configuration
/// swapped at runtime takes effect on the next delivery.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used between attempts (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use roomwatch::webhook::{HttpWebhook, ReqwestClient};
///
/// let webhook = HttpWebhook::new(ReqwestClient::new());
/// ```
#[derive(Debug)]
pub struct HttpWebhook<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
}

impl<H> HttpWebhook<H, TokioSleeper> {
    /// Creates a new HTTP webhook that waits with [`TokioSleeper`].
    #[must_use]
    pub const fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
        }
    }
}

impl<H, S> HttpWebhook<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HttpWebhook<H, S2> {
        HttpWebhook {
            client: self.client,
            sleeper,
        }
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }
}

impl<H: HttpClient, S: Sleeper> HttpWebhook<H, S> {
    /// Executes a single request attempt.
    async fn execute_request(&self, request: &HttpRequest) -> Result<(), RetryableError> {
        let response = self
            .client
            .request(request.clone())
            .await
            .map_err(|e| e.redact(&request.url))?;

        if response.is_success() {
            return Ok(());
        }

        Err(RetryableError::NonSuccessStatus {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        })
    }

    /// Sends with retry logic.
    async fn send_with_retry(
        &self,
        endpoint: &EndpointConfig,
        payload: &Payload,
    ) -> Result<(), WebhookError> {
        let Some(url) = endpoint.url.as_ref() else {
            tracing::debug!("Webhook not configured, skipping send");
            return Err(WebhookError::NotConfigured);
        };

        let masked = endpoint.masked_url();

        if !endpoint.enabled {
            tracing::debug!(url = %masked, "Webhook disabled, skipping send");
            return Err(WebhookError::Disabled);
        }

        let request = HttpRequest::post_json(url.clone(), payload)
            .map_err(RetryableError::Serialize)?
            .with_timeout(endpoint.timeout);

        let policy = endpoint.retry_policy();
        let mut last_error: Option<RetryableError> = None;

        for attempt in 1..=policy.max_attempts() {
            match self.execute_request(&request).await {
                Ok(()) => {
                    tracing::info!(url = %masked, attempt, "Webhook delivered");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        url = %masked,
                        attempt,
                        max_attempts = policy.max_attempts(),
                        "Webhook attempt failed: {e}"
                    );

                    if !e.is_retryable() {
                        tracing::error!(url = %masked, "Webhook failed with non-retryable error");
                        return Err(e.into());
                    }

                    last_error = Some(e);

                    // Don't sleep after the last attempt
                    if policy.should_retry(attempt) {
                        let delay = policy.delay_for_retry(attempt - 1);
                        tracing::debug!(
                            url = %masked,
                            delay_secs = delay.as_secs_f64(),
                            "Retrying webhook after backoff"
                        );
                        self.sleeper.sleep(delay).await;
                    }
                }
            }
        }

        tracing::error!(
            url = %masked,
            attempts = policy.max_attempts(),
            "Webhook failed after exhausting retries"
        );

        Err(WebhookError::MaxRetriesExceeded {
            attempts: policy.max_attempts(),
            last_error: last_error.expect("max_attempts >= 1 ensures at least one attempt"),
        })
    }
}

impl<H: HttpClient, S: Sleeper> WebhookSender for HttpWebhook<H, S> {
    async fn send(&self, endpoint: &EndpointConfig, payload: &Payload) -> Result<(), WebhookError> {
        self.send_with_retry(endpoint, payload).await
    }
}

/// Extension trait for checking if an error is transient.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            // URL errors are configuration issues, not transient
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for RetryableError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            // Any non-2xx answer is treated as transient
            Self::NonSuccessStatus { .. } => true,
            Self::Serialize(_) => false,
        }
    }
}
