//! Error types for webhook delivery.

use thiserror::Error;
use url::Url;

use super::mask::redact;

/// Longest response body excerpt shown in an error message, in characters.
const BODY_EXCERPT_CHARS: usize = 200;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the per-attempt timeout.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This indicates a configuration error rather than a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// Strips `url` from the error text so it can be logged.
    ///
    /// A connection error whose message does not mention the URL keeps its
    /// original source.
    #[must_use]
    pub fn redact(self, url: &Url) -> Self {
        match self {
            Self::Connection(source) => {
                let text = source.to_string();
                let clean = redact(&text, url);
                if clean == text {
                    Self::Connection(source)
                } else {
                    Self::Connection(clean.into())
                }
            }
            Self::InvalidUrl(reason) => Self::InvalidUrl(redact(&reason, url)),
            Self::Timeout => Self::Timeout,
        }
    }
}

/// Error from one delivery attempt.
///
/// Whether the attempt is worth repeating is decided by
/// [`IsRetryable`](super::IsRetryable).
#[derive(Debug, Error)]
pub enum RetryableError {
    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The server answered with a non-2xx status.
    #[error("Endpoint returned {status}{}", excerpt(.body.as_deref()))]
    NonSuccessStatus {
        /// Status code returned by the endpoint
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// The payload could not be encoded as JSON.
    #[error("Failed to encode payload: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Error type for a complete delivery (all attempts).
#[derive(Debug, Error)]
pub enum WebhookError {
    /// No endpoint URL has been configured.
    #[error("Webhook endpoint is not configured")]
    NotConfigured,

    /// The endpoint is configured but switched off.
    #[error("Webhook endpoint is disabled")]
    Disabled,

    /// A failure that retrying cannot fix.
    #[error("Webhook delivery failed: {0}")]
    NonRetryable(#[source] RetryableError),

    /// Every attempt in the retry budget failed.
    #[error("Webhook delivery failed after {attempts} attempt(s): {last_error}")]
    MaxRetriesExceeded {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: RetryableError,
    },
}

impl From<RetryableError> for WebhookError {
    fn from(error: RetryableError) -> Self {
        Self::NonRetryable(error)
    }
}

impl WebhookError {
    /// Returns true if the delivery was skipped without touching the network.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::NotConfigured | Self::Disabled)
    }
}

/// Renders `": <body>"` for a non-empty body, shortened to
/// [`BODY_EXCERPT_CHARS`].
fn excerpt(body: Option<&str>) -> String {
    let Some(text) = body.map(str::trim).filter(|t| !t.is_empty()) else {
        return String::new();
    };

    let mut chars = text.chars();
    let mut short: String = chars.by_ref().take(BODY_EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        short.push_str("...");
    }
    format!(": {short}")
}
