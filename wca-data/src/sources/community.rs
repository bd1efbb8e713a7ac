//! Community static export: full result histories and competition metadata.
//!
//! Serves pre-built JSON files, `persons/{id}.json` and
//! `competitions/{id}.json`, from a static host. Cheap to hit repeatedly,
//! so competition metadata is fanned out against it.

use crate::error::WcaError;
use crate::http::{get_json, join_segments};
use crate::types::{Competition, PersonResults};

/// Endpoints of the community export.
#[derive(Debug, Clone)]
pub struct CommunityExport {
    base_url: String,
}

impl CommunityExport {
    /// Point at a base URL such as `https://host/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fetch `persons/{wca_id}.json`.
    ///
    /// # Errors
    ///
    /// Propagates [`get_json`] failures.
    pub async fn person(
        &self,
        client: &reqwest::Client,
        wca_id: &str,
    ) -> Result<Option<PersonResults>, WcaError> {
        tracing::trace!(wca_id, "community person lookup");
        let url = join_segments(&self.base_url, &["persons", &format!("{wca_id}.json")])?;
        get_json(client, url).await
    }

    /// Fetch `competitions/{competition_id}.json`.
    ///
    /// # Errors
    ///
    /// Propagates [`get_json`] failures.
    pub async fn competition(
        &self,
        client: &reqwest::Client,
        competition_id: &str,
    ) -> Result<Option<Competition>, WcaError> {
        tracing::trace!(competition_id, "community competition lookup");
        let url = join_segments(
            &self.base_url,
            &["competitions", &format!("{competition_id}.json")],
        )?;
        let competition: Option<Competition> = get_json(client, url).await?;
        // Some exported files omit their own id; key them by the one we asked for.
        Ok(competition.map(|mut c| {
            if c.id.is_empty() {
                c.id = competition_id.to_owned();
            }
            c
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_base_url() {
        let export = CommunityExport::new("https://example.com/api");
        assert_eq!(export.base_url, "https://example.com/api");
    }

    #[tokio::test]
    async fn bad_base_url_is_config_error() {
        let export = CommunityExport::new("not a url");
        let client = reqwest::Client::new();
        let err = export.person(&client, "X").await.unwrap_err();
        assert!(matches!(err, WcaError::Config(_)));
    }
}
