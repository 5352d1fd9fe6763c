//! URL masking for logs.
//!
//! Incoming-webhook URLs carry their secret in the path, so only the
//! scheme and host may ever be written to a log line.

use url::{Position, Url};

/// Placeholder returned for strings that are not absolute URLs with a host.
pub const INVALID_URL_PLACEHOLDER: &str = "<invalid-url>";

/// Masks a URL string down to `scheme://host[:port]`.
///
/// Never fails: malformed input yields [`INVALID_URL_PLACEHOLDER`].
///
/// # Example
///
/// ```
/// use roomwatch::webhook::mask_url;
///
/// assert_eq!(
///     mask_url("https://hooks.slack.com/services/T000/B111/xyz"),
///     "https://hooks.slack.com"
/// );
/// assert_eq!(mask_url("not a url"), "<invalid-url>");
/// ```
#[must_use]
pub fn mask_url(raw: &str) -> String {
    Url::parse(raw).map_or_else(|_| INVALID_URL_PLACEHOLDER.to_string(), |url| mask(&url))
}

/// Masks a parsed URL down to `scheme://host[:port]`.
///
/// Credentials, path, query and fragment are dropped.
#[must_use]
pub fn mask(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}://{host}:{port}", url.scheme()),
        (Some(host), None) => format!("{}://{host}", url.scheme()),
        (None, _) => INVALID_URL_PLACEHOLDER.to_string(),
    }
}

/// Removes every occurrence of `url`, or of its path onwards, from `text`.
///
/// The full URL is replaced by its masked form; a bare path is removed.
/// Used on error messages produced by lower layers.
#[must_use]
pub fn redact(text: &str, url: &Url) -> String {
    let redacted = text.replace(url.as_str(), &mask(url));
    let secret = &url[Position::BeforePath..];
    if secret.len() > 1 {
        redacted.replace(secret, "")
    } else {
        redacted
    }
}
