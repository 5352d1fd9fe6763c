//! Webhook layer for delivering chat payloads to an external endpoint.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Delivery with retries ([`WebhookSender`], [`HttpWebhook`])
//! - Endpoint settings and their validation ([`EndpointConfig`], [`EndpointUpdate`])
//! - Retry policy configuration ([`RetryPolicy`])
//! - Log-safe URL rendering ([`mask_url`], [`redact`])

mod client;
mod endpoint;
mod error;
mod http;
mod mask;
mod retry;
mod sender;

#[cfg(test)]
mod endpoint_tests;
#[cfg(test)]
mod retry_tests;

pub use client::ReqwestClient;
pub use endpoint::{EndpointConfig, EndpointError, EndpointUpdate, parse_endpoint_url};
pub use error::{HttpError, RetryableError, WebhookError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use mask::{INVALID_URL_PLACEHOLDER, mask, mask_url, redact};
pub use retry::RetryPolicy;
pub use sender::{HttpWebhook, IsRetryable, WebhookSender};
