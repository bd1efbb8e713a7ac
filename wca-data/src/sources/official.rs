//! Official WCA REST API: person profiles, competitor lists and published
//! scrambles.
//!
//! The person document nests ranks, medals and records several levels deep;
//! it is returned as a [`FlatRecord`] so callers can look values up by path.

use serde_json::Value;

use crate::error::WcaError;
use crate::flatten::FlatRecord;
use crate::http::{get_json, join_segments};
use crate::types::{Competitor, Scramble};

/// Endpoints of the official API.
#[derive(Debug, Clone)]
pub struct OfficialApi {
    base_url: String,
}

impl OfficialApi {
    /// Point at a base URL such as `https://host/api/v0`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fetch `persons/{wca_id}` and flatten it.
    ///
    /// # Errors
    ///
    /// Propagates [`get_json`] failures.
    pub async fn person(
        &self,
        client: &reqwest::Client,
        wca_id: &str,
    ) -> Result<Option<FlatRecord>, WcaError> {
        tracing::trace!(wca_id, "official person lookup");
        let url = join_segments(&self.base_url, &["persons", wca_id])?;
        let document: Option<Value> = get_json(client, url).await?;
        Ok(document.as_ref().map(FlatRecord::from_value))
    }

    /// Fetch `competitions/{competition_id}/competitors`.
    ///
    /// # Errors
    ///
    /// Propagates [`get_json`] failures, including
    /// [`WcaError::RateLimited`].
    pub async fn competitors(
        &self,
        client: &reqwest::Client,
        competition_id: &str,
    ) -> Result<Option<Vec<Competitor>>, WcaError> {
        tracing::trace!(competition_id, "official competitor list lookup");
        let url = join_segments(
            &self.base_url,
            &["competitions", competition_id, "competitors"],
        )?;
        get_json(client, url).await
    }

    /// Fetch `competitions/{competition_id}/scrambles`.
    ///
    /// # Errors
    ///
    /// Propagates [`get_json`] failures, including
    /// [`WcaError::RateLimited`].
    pub async fn scrambles(
        &self,
        client: &reqwest::Client,
        competition_id: &str,
    ) -> Result<Option<Vec<Scramble>>, WcaError> {
        tracing::trace!(competition_id, "official scramble list lookup");
        let url = join_segments(
            &self.base_url,
            &["competitions", competition_id, "scrambles"],
        )?;
        get_json(client, url).await
    }
}
