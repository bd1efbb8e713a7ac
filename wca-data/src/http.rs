//! Shared HTTP client and JSON GET helper for both data sources.
//!
//! Provides a configured [`reqwest::Client`] carrying the custom User-Agent
//! and a single GET path that maps 404 to "no data".

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::WcaError;

/// Build a [`reqwest::Client`] for the WCA data sources.
///
/// The client has:
/// - Timeout from config
/// - User-Agent from config (or `mycubing/<version>`)
/// - gzip decompression
///
/// # Errors
///
/// Returns [`WcaError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, WcaError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| WcaError::Http(format!("failed to build HTTP client: {e}")))
}

/// Append path segments to a base URL without dropping the base path.
///
/// `join_segments("https://h/api", &["persons", "X.json"])` yields
/// `https://h/api/persons/X.json`; segments are percent-encoded.
///
/// # Errors
///
/// Returns [`WcaError::Config`] if `base` is not a URL that can carry a path.
pub fn join_segments(base: &str, segments: &[&str]) -> Result<Url, WcaError> {
    let mut url = Url::parse(base).map_err(|e| WcaError::Config(format!("bad base URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| WcaError::Config(format!("base URL cannot have a path: {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// GET `url` and decode the JSON body into `T`.
///
/// Returns `Ok(None)` on HTTP 404.
///
/// # Errors
///
/// - [`WcaError::RateLimited`] on HTTP 429
/// - [`WcaError::Status`] on any other non-success status
/// - [`WcaError::Http`] if the request or body read fails
/// - [`WcaError::Parse`] if the body is not valid JSON for `T`
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: Url,
) -> Result<Option<T>, WcaError> {
    tracing::trace!(%url, "GET");

    let response = client
        .get(url.clone())
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| WcaError::Http(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        tracing::debug!(%url, "no data (404)");
        return Ok(None);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(WcaError::RateLimited(
            url.host_str().unwrap_or("unknown host").to_owned(),
        ));
    }
    if !status.is_success() {
        return Err(WcaError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| WcaError::Http(format!("reading body from {url} failed: {e}")))?;

    tracing::trace!(%url, bytes = bytes.len(), "response received");

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| WcaError::Parse(format!("{url}: {e}")))
}
