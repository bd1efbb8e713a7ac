//! Client configuration with sensible defaults.
//!
//! [`ClientConfig`] controls which endpoints are queried, timeouts, caching,
//! fan-out width and the pacing of the neighbours lookup. The defaults point
//! at the public WCA data sources.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::WcaError;

/// Default base URL of the community-maintained static export.
pub const DEFAULT_COMMUNITY_BASE_URL: &str =
    "https://raw.githubusercontent.com/robiningelbrecht/wca-rest-api/master/api";

/// Default base URL of the official WCA REST API.
pub const DEFAULT_OFFICIAL_BASE_URL: &str = "https://www.worldcubeassociation.org/api/v0";

/// Configuration for a [`crate::WcaClient`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the static export serving `persons/{id}.json` and
    /// `competitions/{id}.json`.
    pub community_base_url: String,
    /// Base URL of the official API serving `persons/{id}` and
    /// `competitions/{id}/competitors`.
    pub official_base_url: String,
    /// User-Agent header sent with every request. If `None`, a
    /// `mycubing/<version>` agent is used.
    pub user_agent: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// How long cached person documents live, in seconds. Competition
    /// metadata is cached for the lifetime of the client.
    pub cache_ttl_seconds: u64,
    /// Maximum number of competitions kept in the metadata cache.
    pub cache_capacity: u64,
    /// Upper bound on concurrent competition metadata fetches.
    pub max_concurrent_fetches: usize,
    /// Minimum spacing in milliseconds between competitor-list requests.
    pub neighbour_spacing_ms: u64,
    /// Ceiling in milliseconds for the backoff after a 429 response.
    pub neighbour_backoff_max_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            community_base_url: DEFAULT_COMMUNITY_BASE_URL.to_owned(),
            official_base_url: DEFAULT_OFFICIAL_BASE_URL.to_owned(),
            user_agent: None,
            timeout_seconds: 15,
            cache_ttl_seconds: 3600,
            cache_capacity: 2048,
            max_concurrent_fetches: 8,
            neighbour_spacing_ms: 250,
            neighbour_backoff_max_ms: 8000,
        }
    }
}

impl ClientConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - both base URLs parse as absolute `http`/`https` URLs
    /// - `timeout_seconds` must be greater than 0
    /// - `max_concurrent_fetches` must be greater than 0
    /// - `cache_capacity` must be greater than 0
    /// - `neighbour_spacing_ms` must be <= `neighbour_backoff_max_ms`
    pub fn validate(&self) -> Result<(), WcaError> {
        check_base_url("community_base_url", &self.community_base_url)?;
        check_base_url("official_base_url", &self.official_base_url)?;
        if self.timeout_seconds == 0 {
            return Err(WcaError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(WcaError::Config(
                "max_concurrent_fetches must be greater than 0".into(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(WcaError::Config(
                "cache_capacity must be greater than 0".into(),
            ));
        }
        if self.neighbour_spacing_ms > self.neighbour_backoff_max_ms {
            return Err(WcaError::Config(
                "neighbour_spacing_ms must be <= neighbour_backoff_max_ms".into(),
            ));
        }
        Ok(())
    }

    /// The User-Agent header value for outgoing requests.
    pub fn user_agent(&self) -> String {
        match self.user_agent {
            Some(ref custom) => custom.clone(),
            None => format!("mycubing/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn check_base_url(field: &str, value: &str) -> Result<(), WcaError> {
    let parsed =
        Url::parse(value).map_err(|e| WcaError::Config(format!("{field} is not a URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(WcaError::Config(format!(
            "{field} must use http or https, got {other}"
        ))),
    }
}
